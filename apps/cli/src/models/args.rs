//! # CLI Argument Definitions
//!
//! Command-line structure of `dojo-builder`, parsed with `clap`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "dojo-builder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Generates Dojo build profiles and package descriptors")]
pub struct Cli {
    /// Configuration file (defaults to an optional `dojo.toml`)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More output: `-v` for debug, `-vv` for trace
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Enumeration of available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render `build.profile.js` from the configuration
    Generate(GenerateArgs),
    /// Substitute `${name}` placeholders in a hand-written profile
    Expand(ExpandArgs),
    /// Parse and validate an existing profile
    Check(CheckArgs),
    /// Tag every file of a package directory
    Classify(ClassifyArgs),
    /// Write the `package.js` resource descriptor
    Package(PackageArgs),
    /// Generate the profile and run the bundler with it
    Build(BuildArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Destination file (overrides `output.path`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Custom Tera template (overrides `output.template`)
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Print to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

#[derive(Debug, Args)]
pub struct ExpandArgs {
    /// Profile containing `${name}` placeholders
    pub input: PathBuf,

    /// Destination file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Extra variable, repeatable (e.g., `--var sourceDestination=app-1.0`)
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub vars: Vec<(String, String)>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Profile to check
    pub profile: PathBuf,

    /// Expand `${name}` placeholders before parsing
    #[arg(long)]
    pub expand: bool,
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Package source directory (defaults to `resources.source_dir/<package>`)
    pub dir: Option<PathBuf>,

    /// Package name used for module ids
    #[arg(short, long)]
    pub package: Option<String>,
}

#[derive(Debug, Args)]
pub struct PackageArgs {
    /// Destination file (defaults to `resources.source_dir/<package>/package.js`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Package to describe (overrides `resources.package`)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Print to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Use the existing profile at `output.path` instead of regenerating it
    #[arg(long)]
    pub skip_generate: bool,
}

fn parse_key_val(value: &str) -> Result<(String, String), String> {
    let (key, val) =
        value.split_once('=').ok_or_else(|| format!("expected KEY=VALUE, got '{value}'"))?;
    if key.trim().is_empty() {
        return Err(format!("empty variable name in '{value}'"));
    }
    Ok((key.trim().to_owned(), val.to_owned()))
}
