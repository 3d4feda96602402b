use std::borrow::Cow;

#[dojo_derive::dojo_error]
pub enum LoggerError {
    /// The name doubles as the log file stem.
    #[error("Logger name '{name}' is not a valid file name{}", format_context(.context))]
    Name { name: String, context: Option<Cow<'static, str>> },

    #[error("Unknown log level '{value}'{}", format_context(.context))]
    Level { value: String, context: Option<Cow<'static, str>> },

    #[error("Invalid log filter '{directives}'{}: {reason}", format_context(.context))]
    Filter { directives: String, reason: String, context: Option<Cow<'static, str>> },

    #[error("Log directory error{}: {source}", format_context(.context))]
    Directory { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Log file error{}: {source}", format_context(.context))]
    Appender { source: tracing_appender::rolling::InitError, context: Option<Cow<'static, str>> },

    /// Another global subscriber is already installed in this process.
    #[error("Logger already installed{}: {source}", format_context(.context))]
    Installed {
        source: tracing_subscriber::util::TryInitError,
        context: Option<Cow<'static, str>>,
    },
}
