use crate::handlers::resource_package;
use crate::models::args::ClassifyArgs;
use anyhow::{Context, Result};
use dojo_domain::config::Settings;
use dojo_resources::{ResourceRules, TagSummary, scan};
use std::io::{self, Write};

/// Scans a package directory and prints one line per file plus a summary.
///
/// # Errors
/// Returns an error if the rules are invalid or the directory cannot be read.
pub fn classify(settings: &Settings, args: &ClassifyArgs) -> Result<()> {
    let package = resource_package(settings, args.package.as_deref(), args.dir.as_deref())?;
    let dir = args.dir.clone().unwrap_or_else(|| settings.resources.source_dir.join(package));

    let rules = ResourceRules::from_config(&settings.resources, package)?;
    let resources =
        scan(&rules, &dir).with_context(|| format!("Failed to classify {}", dir.display()))?;

    let mut out = io::stdout().lock();
    for resource in &resources {
        let tag: &'static str = resource.tag.into();
        writeln!(out, "{tag:<10} {}", resource.mid)?;
    }
    let summary: TagSummary = resources.iter().collect();
    writeln!(out, "{summary}")?;
    Ok(())
}
