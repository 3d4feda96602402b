use crate::handlers::resource_package;
use crate::models::args::PackageArgs;
use anyhow::Result;
use dojo_domain::config::Settings;
use dojo_resources::{render_package_descriptor, write_package_descriptor};

/// Writes the `package.js` resource descriptor of the configured package.
///
/// # Errors
/// Returns an error if no package is known, the rules are invalid or the file
/// cannot be written.
pub fn package(settings: &Settings, args: &PackageArgs) -> Result<()> {
    let package = resource_package(settings, args.package.as_deref(), None)?;
    let text = render_package_descriptor(&settings.resources, package)?;

    if args.stdout {
        print!("{text}");
        return Ok(());
    }
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| settings.resources.source_dir.join(package).join("package.js"));
    write_package_descriptor(&path, &text)?;
    Ok(())
}
