//! `${name}` expansion for hand-written profiles.

use crate::error::ProfileError;
use dojo_domain::BuildProfile;
use fxhash::FxHashSet;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\\)?\$\{([A-Za-z0-9_.\-]+)\}").expect("valid placeholder regex")
});

/// Replaces every `${name}` in `text` with its value from `vars`.
///
/// `\${name}` is kept as the literal `${name}`.
///
/// # Errors
/// Returns [`ProfileError::MissingVariables`] naming every unknown placeholder,
/// in order of first appearance.
pub fn expand_placeholders(
    text: &str,
    vars: &BTreeMap<String, String>,
) -> Result<String, ProfileError> {
    let mut missing = Vec::new();
    let mut seen = FxHashSet::default();

    let expanded = PLACEHOLDER.replace_all(text, |caps: &Captures<'_>| {
        let name = &caps[2];
        if caps.get(1).is_some() {
            return format!("${{{name}}}");
        }
        vars.get(name).cloned().unwrap_or_else(|| {
            if seen.insert(name.to_owned()) {
                missing.push(name.to_owned());
            }
            String::new()
        })
    });

    if missing.is_empty() {
        Ok(expanded.into_owned())
    } else {
        Err(ProfileError::MissingVariables { names: missing, context: None })
    }
}

/// Variables every expansion can use: `basePath`, `releaseDir` and
/// `releaseName` from the profile, overlaid by `extra`.
#[must_use]
pub fn builtin_variables(
    profile: &BuildProfile,
    extra: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut vars = BTreeMap::from([
        ("basePath".to_owned(), profile.base_path.clone()),
        ("releaseDir".to_owned(), profile.release_dir.clone()),
        ("releaseName".to_owned(), profile.release_name.clone()),
    ]);
    vars.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    vars
}
