use crate::models::args::ExpandArgs;
use anyhow::{Context, Result};
use dojo_domain::config::Settings;
use dojo_profile::{builtin_variables, expand_placeholders, write_profile};
use std::fs;
use tracing::debug;

/// Expands `${name}` placeholders of a hand-written profile.
///
/// Values come from the profile scalars, `output.variables` and `--var`, the
/// latter winning.
///
/// # Errors
/// Returns an error if the input cannot be read, a placeholder has no value or
/// the output cannot be written.
pub fn expand(settings: &Settings, args: &ExpandArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let mut extra = settings.output.variables.clone();
    extra.extend(args.vars.iter().cloned());
    let vars = builtin_variables(&settings.profile, &extra);
    debug!(count = vars.len(), "Expanding placeholders");

    let expanded = expand_placeholders(&text, &vars)
        .with_context(|| format!("Failed to expand {}", args.input.display()))?;

    match &args.output {
        Some(path) => write_profile(path, &expanded)?,
        None => print!("{expanded}"),
    }
    Ok(())
}
