pub mod build;
pub mod check;
pub mod classify;
pub mod expand;
pub mod generate;
pub mod package;

use anyhow::{Context, Result};
use dojo_domain::config::Settings;
use std::path::Path;

/// Package a resource command works on: the flag, then `resources.package`,
/// then the last declared profile package, then the directory name.
fn resource_package<'a>(
    settings: &'a Settings,
    flag: Option<&'a str>,
    dir: Option<&'a Path>,
) -> Result<&'a str> {
    flag.or_else(|| settings.resource_package())
        .or_else(|| dir.and_then(Path::file_name).and_then(|name| name.to_str()))
        .context("No package to work on: pass --package or declare one in the configuration")
}
