use crate::handlers::generate;
use crate::models::args::BuildArgs;
use crate::services::runner::BuildCommand;
use anyhow::{Result, bail};
use dojo_domain::config::Settings;
use dojo_profile::write_profile;
use tracing::info;

/// Generates the profile (unless skipped) and runs the bundler with it.
///
/// # Errors
/// Returns an error if generation fails, the profile is missing or the bundler
/// does not succeed.
pub fn build(settings: &Settings, args: &BuildArgs) -> Result<()> {
    let path = &settings.output.path;
    if args.skip_generate {
        if !path.is_file() {
            bail!("No profile at {}; run without --skip-generate first", path.display());
        }
    } else {
        let text = generate::render(settings, None)?;
        write_profile(path, &text)?;
    }

    BuildCommand::new(&settings.runner, path)?.run()?;
    info!("Build finished");
    Ok(())
}
