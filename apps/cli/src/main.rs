#![allow(clippy::print_stdout, clippy::print_stderr)]

pub mod handlers;
pub mod models;
pub mod services;

use crate::handlers::{build, check, classify, expand, generate, package};
use crate::models::args::{Cli, Commands};

use anyhow::{Context, Result};
use clap::Parser;
use dojo_domain::config::LoggingConfig;
use dojo_kernel::config::load_settings;
use dojo_logger::{FileFormat, Logger, level_from_verbosity, parse_level};

/// Log file stem (`<logging.path>/dojo-builder.log`).
const LOGGER_NAME: &str = "dojo-builder";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref()).context("Failed to load settings")?;
    let _logger = init_logger(&settings.logging, cli.verbose, cli.quiet)?;

    match &cli.command {
        Commands::Generate(args) => generate::generate(&settings, args)?,
        Commands::Expand(args) => expand::expand(&settings, args)?,
        Commands::Check(args) => check::check(&settings, args)?,
        Commands::Classify(args) => classify::classify(&settings, args)?,
        Commands::Package(args) => package::package(&settings, args)?,
        Commands::Build(args) => build::build(&settings, args)?,
    }

    Ok(())
}

/// Verbosity flags win over `logging.level`; `logging.filter` or `RUST_LOG` win over both.
fn init_logger(config: &LoggingConfig, verbose: u8, quiet: bool) -> Result<Logger> {
    let level = if verbose > 0 || quiet {
        level_from_verbosity(verbose, quiet)
    } else {
        parse_level(&config.level)?
    };

    let mut builder = Logger::builder(LOGGER_NAME).level(level);
    if let Some(filter) = &config.filter {
        builder = builder.directives(filter);
    }
    if let Some(dir) = &config.path {
        builder = builder.file(dir, FileFormat::from(config.json));
    }
    builder.init().context("Failed to initialize logging")
}
