use crate::models::args::GenerateArgs;
use anyhow::{Context, Result};
use dojo_domain::config::Settings;
use dojo_profile::{ProfileRenderer, write_profile};
use std::path::Path;

/// Renders the configured profile and writes it (or prints it with `--stdout`).
///
/// # Errors
/// Returns an error if the profile is invalid, the template fails or the file
/// cannot be written.
pub fn generate(settings: &Settings, args: &GenerateArgs) -> Result<()> {
    let text = render(settings, args.template.as_deref())?;
    if args.stdout {
        print!("{text}");
        return Ok(());
    }
    write_profile(args.output.as_deref().unwrap_or(&settings.output.path), &text)?;
    Ok(())
}

/// Renders with `template`, falling back to `output.template` and then to the
/// built-in template.
pub(crate) fn render(settings: &Settings, template: Option<&Path>) -> Result<String> {
    let renderer = match template.or(settings.output.template.as_deref()) {
        Some(path) => ProfileRenderer::from_path(path)?,
        None => ProfileRenderer::builtin()?,
    };
    renderer
        .render(&settings.profile, &settings.output.variables)
        .with_context(|| format!("Failed to render {}", renderer.template_name()))
}
