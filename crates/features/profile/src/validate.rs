//! Shape checks run before a profile is rendered.

use crate::error::ProfileError;
use dojo_domain::BuildProfile;
use fxhash::FxHashSet;

/// Checks that a profile can be emitted as a valid descriptor.
///
/// All problems are collected so a broken configuration can be fixed in one pass.
///
/// # Errors
/// Returns [`ProfileError::Invalid`] listing every problem found.
pub fn validate(profile: &BuildProfile) -> Result<(), ProfileError> {
    let mut problems = Vec::new();

    require(&mut problems, "basePath", &profile.base_path);
    require(&mut problems, "releaseDir", &profile.release_dir);
    require(&mut problems, "releaseName", &profile.release_name);

    let mut package_names = FxHashSet::default();
    for (index, package) in profile.packages.iter().enumerate() {
        if package.name.trim().is_empty() {
            problems.push(format!("package #{} has an empty name", index + 1));
        } else {
            check_identifier(&mut problems, "package name", &package.name);
            if !package_names.insert(package.name.as_str()) {
                problems.push(format!("package '{}' is declared more than once", package.name));
            }
        }
        if package.location.trim().is_empty() {
            problems.push(format!("package '{}' has an empty location", package.name));
        } else {
            check_identifier(&mut problems, "package location", &package.location);
        }
    }

    let mut layer_names = FxHashSet::default();
    if let Some(boot) = &profile.boot_layer {
        check_layer_name(&mut problems, &mut layer_names, &boot.name);
        if boot.includes.is_empty() {
            problems.push(format!("boot layer '{}' has no includes", boot.name));
        }
        check_modules(&mut problems, &boot.name, &boot.includes);
    }

    for layer in &profile.layers {
        check_layer_name(&mut problems, &mut layer_names, &layer.name);
        check_modules(&mut problems, &layer.name, &layer.includes);
        check_modules(&mut problems, &layer.name, &layer.excludes);
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ProfileError::Invalid { problems, context: None })
    }
}

/// Whether a value can sit inside a single-quoted descriptor literal unescaped.
#[must_use]
pub fn is_emittable(value: &str) -> bool {
    !value.chars().any(|c| matches!(c, '\'' | '"' | '\\' | '\n' | '\r'))
}

fn require(problems: &mut Vec<String>, key: &str, value: &str) {
    if value.trim().is_empty() {
        problems.push(format!("{key} must not be empty"));
    }
}

fn check_identifier(problems: &mut Vec<String>, what: &str, value: &str) {
    if !is_emittable(value) {
        problems.push(format!(
            "{what} '{}' contains quotes, backslashes or line breaks",
            value.escape_debug()
        ));
    }
}

fn check_layer_name<'a>(problems: &mut Vec<String>, seen: &mut FxHashSet<&'a str>, name: &'a str) {
    if name.trim().is_empty() {
        problems.push("a layer has an empty name".to_owned());
        return;
    }
    check_identifier(problems, "layer name", name);
    if !seen.insert(name) {
        problems.push(format!("layer '{name}' is declared more than once"));
    }
}

fn check_modules(problems: &mut Vec<String>, layer: &str, modules: &[String]) {
    for module in modules {
        if module.trim().is_empty() {
            problems.push(format!("layer '{layer}' lists an empty module id"));
        } else if !is_emittable(module) {
            problems.push(format!(
                "layer '{layer}' module '{}' contains quotes, backslashes or line breaks",
                module.escape_debug()
            ));
        }
    }
}
