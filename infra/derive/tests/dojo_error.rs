use dojo_derive::dojo_error;
use std::borrow::Cow;

#[dojo_error]
pub enum SampleError {
    #[error("I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Bad input{}: {message}", format_context(.context))]
    BadInput { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal failure{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_missing() -> Result<String, SampleError> {
    Ok(std::fs::read_to_string("/definitely/not/here.profile.js")?)
}

#[test]
fn source_errors_convert_with_question_mark() {
    let err = read_missing().expect_err("missing file must fail");
    assert!(matches!(err, SampleError::Io { context: None, .. }));
    assert!(err.to_string().starts_with("I/O failure: "));
}

#[test]
fn context_is_rendered_in_display() {
    let err = std::fs::read_to_string("/definitely/not/here.profile.js")
        .context("reading the profile")
        .expect_err("missing file must fail");
    assert!(err.to_string().starts_with("I/O failure (reading the profile): "));
}

#[test]
fn context_can_be_attached_to_own_results() {
    let res: Result<(), SampleError> =
        Err(SampleError::BadInput { message: "empty name".into(), context: None });
    let err = res.context("validating packages").expect_err("still an error");
    assert_eq!(err.to_string(), "Bad input (validating packages): empty name");
}

#[test]
fn strings_become_internal_errors() {
    let from_static: SampleError = "boom".into();
    let from_owned: SampleError = String::from("bang").into();
    assert_eq!(from_static.to_string(), "Internal failure: boom");
    assert_eq!(from_owned.to_string(), "Internal failure: bang");
}

#[test]
fn dojo_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/dojo_error_pass.rs");
}
