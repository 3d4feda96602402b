use crate::models::args::CheckArgs;
use anyhow::{Context, Result};
use dojo_domain::BuildProfile;
use dojo_domain::config::Settings;
use dojo_profile::{builtin_variables, expand_placeholders, parse_profile, validate};
use std::fmt::Write as _;
use std::fs;

/// Parses and validates a profile, then prints what it declares.
///
/// # Errors
/// Returns an error if the file cannot be read, does not parse or is invalid.
pub fn check(settings: &Settings, args: &CheckArgs) -> Result<()> {
    let path = args.profile.display();
    let mut text =
        fs::read_to_string(&args.profile).with_context(|| format!("Failed to read {path}"))?;
    if args.expand {
        let vars = builtin_variables(&settings.profile, &settings.output.variables);
        text = expand_placeholders(&text, &vars)?;
    }

    let profile =
        parse_profile(&text).with_context(|| format!("{path} is not a readable build profile"))?;
    validate(&profile).with_context(|| format!("{path} is not a valid build profile"))?;

    print!("{path}: OK\n{}", summary(&profile)?);
    Ok(())
}

fn summary(profile: &BuildProfile) -> Result<String> {
    let mut w = String::new();
    let names: Vec<&str> = profile.packages.iter().map(|p| p.name.as_str()).collect();
    writeln!(w, "  packages: {} ({})", names.len(), names.join(", "))?;
    writeln!(w, "  layers:   {}", profile.layer_count())?;
    if let Some(boot) = &profile.boot_layer {
        writeln!(w, "    {} (boot, {} includes)", boot.name, boot.includes.len())?;
    }
    for layer in &profile.layers {
        writeln!(
            w,
            "    {} ({} includes, {} excludes)",
            layer.name,
            layer.includes.len(),
            layer.excludes.len()
        )?;
    }
    writeln!(
        w,
        "  optimize: layers={} scripts={} css={}",
        profile.layer_optimize, profile.optimize, profile.css_optimize
    )?;
    Ok(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dojo_domain::{BootLayer, Layer, Package};

    #[test]
    fn test_summary_lists_packages_and_layers() {
        let profile = BuildProfile {
            packages: vec![Package::new("dojo", "dojo"), Package::new("app", "../app")],
            boot_layer: Some(BootLayer {
                name: "dojo/dojo".into(),
                custom_base: false,
                includes: vec!["dojo/dojo".into()],
            }),
            layers: vec![Layer { name: "app/main".into(), includes: vec![], excludes: vec![] }],
            ..BuildProfile::default()
        };
        let text = summary(&profile).unwrap();
        assert!(text.contains("  packages: 2 (dojo, app)\n"));
        assert!(text.contains("    dojo/dojo (boot, 1 includes)\n"));
        assert!(text.contains("    app/main (0 includes, 0 excludes)\n"));
        assert!(text.contains("layers=shrinksafe scripts=false css=comments"));
    }
}
