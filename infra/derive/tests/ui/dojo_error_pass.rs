use dojo_derive::dojo_error;
use std::borrow::Cow;

#[dojo_error]
#[derive(Debug)]
pub enum DemoError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse {
        #[source]
        source: std::num::ParseIntError,
        context: Option<std::borrow::Cow<'static, str>>,
    },

    #[error("Plain error: {message}")]
    Plain { message: Cow<'static, str> },
}

fn main() {
    let err: DemoError = "x".parse::<u8>().unwrap_err().into();
    let _ = err.to_string();
}
