use std::borrow::Cow;

/// Error types of the resources crate.
#[dojo_derive::dojo_error]
pub enum ResourceError {
    /// A tagging rule compiled into an invalid regular expression.
    #[error("Invalid resource pattern{}: {source}", format_context(.context))]
    Pattern { source: regex::Error, context: Option<Cow<'static, str>> },

    /// A rule that cannot describe any module id (e.g., an empty package name).
    #[error("Invalid resource rule '{rule}'{}: {reason}", format_context(.context))]
    InvalidRule { rule: String, reason: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Walking the package tree failed.
    #[error("Failed to scan resources{}: {source}", format_context(.context))]
    Walk { source: walkdir::Error, context: Option<Cow<'static, str>> },

    /// Formatting the `package.js` text failed.
    #[error("Failed to format package descriptor{}: {source}", format_context(.context))]
    Format { source: std::fmt::Error, context: Option<Cow<'static, str>> },

    /// Writing `package.js` failed.
    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal resource error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
