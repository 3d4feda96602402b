use std::borrow::Cow;

/// Error types of the profile crate.
#[dojo_derive::dojo_error]
pub enum ProfileError {
    /// One or more validation problems, reported together.
    #[error("Invalid build profile{}: {}", format_context(.context), .problems.join("; "))]
    Invalid { problems: Vec<String>, context: Option<Cow<'static, str>> },

    /// Tera failed to parse or render a template.
    #[error("Template '{template}' failed{}: {source}", format_context(.context))]
    Template { template: String, source: tera::Error, context: Option<Cow<'static, str>> },

    /// `${name}` placeholders without a value.
    #[error("Missing variables{}: {}", format_context(.context), .names.join(", "))]
    MissingVariables { names: Vec<String>, context: Option<Cow<'static, str>> },

    /// The descriptor text is not in the supported object-literal subset.
    #[error("Parse error at byte {offset}{}: {message}", format_context(.context))]
    Parse { offset: usize, message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Reading or writing a descriptor file failed.
    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal profile error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
