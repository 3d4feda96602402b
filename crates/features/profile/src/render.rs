//! Descriptor rendering through Tera.

use crate::error::{ProfileError, ProfileErrorExt};
use crate::filters;
use crate::validate::validate;
use dojo_domain::BuildProfile;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tera::{Context, Tera};
use tracing::{debug, info};

const BUILTIN_NAME: &str = "build.profile.js";
const BUILTIN_TEMPLATE: &str = include_str!("../templates/build.profile.js.tera");

/// Context keys owned by the renderer; user variables cannot shadow them.
const RESERVED_KEYS: [&str; 4] = ["profile", "layers", "action", "vars"];

/// Renders [`BuildProfile`]s into descriptor text.
///
/// Templates see:
/// * `profile`: the profile itself (flags that are switched off are `false`),
/// * `layers`: every layer in emission order, the boot layer first with `boot = true`,
/// * `action`: always `"release"`,
/// * `vars`: the user variables, also available as top-level names.
///
/// Referencing anything else fails the render.
#[derive(Debug)]
pub struct ProfileRenderer {
    tera: Tera,
    template: String,
}

/// One entry of the `layers` template variable.
#[derive(Debug, Serialize)]
struct LayerView<'a> {
    name: &'a str,
    boot: bool,
    custom_base: bool,
    includes: &'a [String],
    excludes: &'a [String],
}

impl ProfileRenderer {
    /// Uses the embedded descriptor template.
    ///
    /// # Errors
    /// Returns [`ProfileError::Template`] if the embedded template fails to compile.
    pub fn builtin() -> Result<Self, ProfileError> {
        Self::from_source(BUILTIN_NAME, BUILTIN_TEMPLATE)
    }

    /// Loads a custom Tera template from disk.
    ///
    /// # Errors
    /// Returns [`ProfileError::Io`] if the file cannot be read and
    /// [`ProfileError::Template`] if it is not a valid template.
    pub fn from_path(path: &Path) -> Result<Self, ProfileError> {
        let source = fs::read_to_string(path)
            .context(format!("Failed to read template {}", path.display()))?;
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or(BUILTIN_NAME);
        debug!(template = %path.display(), "Loaded custom profile template");
        Self::from_source(name, &source)
    }

    /// Compiles `source` under `name`.
    ///
    /// # Errors
    /// Returns [`ProfileError::Template`] on template syntax errors.
    pub fn from_source(name: &str, source: &str) -> Result<Self, ProfileError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.register_filter("js_value", filters::js_value);
        tera.register_filter("js_id", filters::js_id);
        tera.add_raw_template(name, source).map_err(|source| ProfileError::Template {
            template: name.to_owned(),
            source,
            context: None,
        })?;

        Ok(Self { tera, template: name.to_owned() })
    }

    /// Name of the template this renderer uses.
    #[must_use]
    pub fn template_name(&self) -> &str {
        &self.template
    }

    /// Validates `profile` and renders it.
    ///
    /// # Errors
    /// Returns [`ProfileError::Invalid`] for invalid profiles and
    /// [`ProfileError::Template`] when rendering fails (e.g., an undefined variable).
    pub fn render(
        &self,
        profile: &BuildProfile,
        variables: &BTreeMap<String, String>,
    ) -> Result<String, ProfileError> {
        validate(profile)?;

        let context = build_context(profile, variables);
        let text = self.tera.render(&self.template, &context).map_err(|source| {
            ProfileError::Template { template: self.template.clone(), source, context: None }
        })?;

        debug!(
            template = %self.template,
            packages = profile.packages.len(),
            layers = profile.layer_count(),
            "Rendered build profile"
        );
        Ok(text)
    }
}

/// Renders with the built-in template.
///
/// # Errors
/// See [`ProfileRenderer::render`].
pub fn render_profile(
    profile: &BuildProfile,
    variables: &BTreeMap<String, String>,
) -> Result<String, ProfileError> {
    ProfileRenderer::builtin()?.render(profile, variables)
}

/// Writes descriptor text to `path`, creating parent directories.
///
/// # Errors
/// Returns [`ProfileError::Io`] if a directory or the file cannot be written.
pub fn write_profile(path: &Path, text: &str) -> Result<(), ProfileError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .context(format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, text).context(format!("Failed to write profile to {}", path.display()))?;
    info!("Wrote build profile to {}", path.display());
    Ok(())
}

fn build_context(profile: &BuildProfile, variables: &BTreeMap<String, String>) -> Context {
    let mut layers = Vec::with_capacity(profile.layer_count());
    if let Some(boot) = &profile.boot_layer {
        layers.push(LayerView {
            name: &boot.name,
            boot: true,
            custom_base: boot.custom_base,
            includes: &boot.includes,
            excludes: &[],
        });
    }
    layers.extend(profile.layers.iter().map(|layer| LayerView {
        name: &layer.name,
        boot: false,
        custom_base: false,
        includes: &layer.includes,
        excludes: &layer.excludes,
    }));

    let mut context = Context::new();
    for (key, value) in variables {
        if !RESERVED_KEYS.contains(&key.as_str()) {
            context.insert(key.as_str(), value);
        }
    }
    context.insert("profile", profile);
    context.insert("layers", &layers);
    context.insert("action", BuildProfile::ACTION);
    context.insert("vars", variables);
    context
}
