//! # Logger
//!
//! Installs the global `tracing` subscriber for `dojo-builder`.
//!
//! Events always go to `stderr`, so commands that print descriptors on
//! `stdout` stay pipeable. A log file `<dir>/<name>.log` can be added in plain
//! text or JSON lines; a non-blocking worker writes it and the returned
//! [`Logger`] flushes it on drop.
//!
//! ```rust
//! use dojo_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder("dojo-builder").level(LevelFilter::DEBUG).init().unwrap();
//! tracing::debug!("ready");
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Layout of the optional log file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileFormat {
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl From<bool> for FileFormat {
    fn from(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LogFile {
    dir: PathBuf,
    format: FileFormat,
}

/// Configures the subscriber installed by [`LoggerBuilder::init`].
#[derive(Debug)]
#[must_use = "call `init` to install the logger"]
pub struct LoggerBuilder {
    name: String,
    level: LevelFilter,
    directives: Option<String>,
    file: Option<LogFile>,
}

impl LoggerBuilder {
    /// Level used when neither [`Self::directives`] nor `RUST_LOG` give any. `INFO` unless set.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Filter directives such as `dojo_profile=trace`. They replace `RUST_LOG`.
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    /// Also writes events to `<dir>/<name>.log`.
    pub fn file(mut self, dir: impl Into<PathBuf>, format: FileFormat) -> Self {
        self.file = Some(LogFile { dir: dir.into(), format });
        self
    }

    /// Path of the log file, when one is configured.
    #[must_use]
    pub fn log_file(&self) -> Option<PathBuf> {
        self.file.as_ref().map(|file| file.dir.join(self.file_name()))
    }

    fn file_name(&self) -> String {
        format!("{}.log", self.name)
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.directives {
            Some(directives) => builder.parse(directives).map_err(|e| LoggerError::Filter {
                directives: directives.clone(),
                reason: e.to_string(),
                context: None,
            }),
            None => Ok(builder.from_env_lossy()),
        }
    }

    /// Installs the global subscriber.
    ///
    /// # Errors
    /// Returns [`LoggerError::Name`] for a blank name, [`LoggerError::Filter`]
    /// for unparsable directives, [`LoggerError::Directory`] or
    /// [`LoggerError::Appender`] if the log file cannot be opened and
    /// [`LoggerError::Installed`] when another subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        if self.name.trim().is_empty() || self.name.contains(['/', '\\']) {
            return Err(LoggerError::Name { name: self.name, context: None });
        }
        let filter = self.env_filter()?;

        let mut layers =
            vec![fmt::layer().compact().with_target(false).with_writer(std::io::stderr).boxed()];

        let guard = match &self.file {
            Some(LogFile { dir, format }) => {
                let (writer, guard) = file_writer(dir, &self.file_name())?;
                let layer = fmt::layer().with_writer(writer).with_ansi(false);
                layers.push(match format {
                    FileFormat::Json => layer.json().boxed(),
                    FileFormat::Text => layer.boxed(),
                });
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        Ok(Logger { file_writer: guard })
    }
}

fn file_writer(dir: &Path, file_name: &str) -> Result<(NonBlocking, WorkerGuard), LoggerError> {
    fs::create_dir_all(dir).context(format!("Failed to create {}", dir.display()))?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)?;
    Ok(tracing_appender::non_blocking(appender))
}

/// Keeps the file writer alive; buffered lines are flushed when it drops.
#[must_use = "dropping the logger stops the log file writer"]
#[derive(Debug)]
pub struct Logger {
    file_writer: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a builder; `name` is also the log file stem.
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder { name: name.into(), level: LevelFilter::INFO, directives: None, file: None }
    }

    /// Whether events are also written to a file.
    #[must_use]
    pub const fn writes_file(&self) -> bool {
        self.file_writer.is_some()
    }
}

/// Maps the number of `-v` flags to a level: none is `INFO`, one is `DEBUG`,
/// two or more is `TRACE`. `quiet` wins and yields `WARN`.
#[must_use]
pub const fn level_from_verbosity(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::WARN;
    }
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Parses a level name such as `"info"` or `"off"` (case-insensitive).
///
/// # Errors
/// Returns [`LoggerError::Level`] for unknown names.
pub fn parse_level(value: &str) -> Result<LevelFilter, LoggerError> {
    LevelFilter::from_str(value.trim())
        .map_err(|_| LoggerError::Level { value: value.to_owned(), context: None })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path() {
        let builder = Logger::builder("dojo-builder");
        assert_eq!(builder.log_file(), None);

        let builder = builder.file("logs", FileFormat::Json);
        assert_eq!(builder.log_file(), Some(PathBuf::from("logs/dojo-builder.log")));
    }

    #[test]
    fn test_file_format_from_flag() {
        assert_eq!(FileFormat::from(true), FileFormat::Json);
        assert_eq!(FileFormat::from(false), FileFormat::Text);
    }

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(level_from_verbosity(0, false), LevelFilter::INFO);
        assert_eq!(level_from_verbosity(1, false), LevelFilter::DEBUG);
        assert_eq!(level_from_verbosity(4, false), LevelFilter::TRACE);
        assert_eq!(level_from_verbosity(2, true), LevelFilter::WARN);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::WARN);
        let err = parse_level("loud").unwrap_err();
        assert_eq!(err.to_string(), "Unknown log level 'loud'");
    }

    #[test]
    fn test_bad_directives_are_rejected_before_install() {
        let err = Logger::builder("dojo-test").directives("dojo_profile=verbose").init();
        assert!(matches!(err, Err(LoggerError::Filter { .. })));
    }

    #[test]
    fn test_name_must_be_a_file_stem() {
        for name in ["  ", "logs/dojo"] {
            let err = Logger::builder(name).init();
            assert!(matches!(err, Err(LoggerError::Name { .. })), "{name}");
        }
    }
}
