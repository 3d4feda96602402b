use dojo_logger::{FileFormat, LevelFilter, Logger, LoggerError};
use std::fs;

// One subscriber per process, so install and reinstall live in one test.
#[test]
fn json_log_file_and_single_install() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let builder = Logger::builder("dojo-json")
        .level(LevelFilter::DEBUG)
        .file(dir.path().join("logs"), FileFormat::Json);
    let log_file = builder.log_file().expect("file configured");

    let logger = builder.init()?;
    assert!(logger.writes_file());
    tracing::debug!(layers = 2, "Rendered build profile");
    tracing::trace!("below the configured level");

    let err = Logger::builder("dojo-json-again").init().expect_err("already installed");
    assert!(matches!(err, LoggerError::Installed { .. }));

    drop(logger);

    let content = fs::read_to_string(log_file)?;
    let lines: Vec<serde_json::Value> =
        content.lines().map(serde_json::from_str).collect::<Result<_, _>>()?;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["level"], "DEBUG");
    assert_eq!(lines[0]["fields"]["message"], "Rendered build profile");
    assert_eq!(lines[0]["fields"]["layers"], 2);
    Ok(())
}
