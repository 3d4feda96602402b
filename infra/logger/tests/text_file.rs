use dojo_logger::{FileFormat, LevelFilter, Logger};
use std::fs;

#[test]
fn directives_filter_the_text_log_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let builder = Logger::builder("dojo-text")
        .level(LevelFilter::TRACE)
        .directives("warn,text_file=info")
        .file(dir.path(), FileFormat::Text);
    let log_file = builder.log_file().expect("file configured");

    let logger = builder.init()?;
    tracing::info!("Wrote package descriptor");
    tracing::debug!("filtered out by the directive");
    tracing::info!(target: "dojo_resources", "filtered out by the default");
    drop(logger);

    let content = fs::read_to_string(log_file)?;
    assert_eq!(content.lines().count(), 1, "{content}");
    assert!(content.contains("INFO"));
    assert!(content.contains("Wrote package descriptor"));
    assert!(!content.trim_start().starts_with('{'));
    Ok(())
}
