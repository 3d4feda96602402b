use config::{Config, Environment, File, FileFormat};
use dojo_domain::config::Settings;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

/// Default settings file looked up in the working directory (`dojo.toml`).
pub const DEFAULT_CONFIG_NAME: &str = "dojo";
/// Prefix of environment overrides (`DOJO__PROFILE__RELEASE_NAME=nightly`).
pub const ENV_PREFIX: &str = "DOJO";
const ENV_SEPARATOR: &str = "__";

/// Custom error type for config loading.
#[dojo_derive::dojo_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads the tool [`Settings`].
///
/// See [`load_config`] for the layering rules.
///
/// # Errors
/// Returns [`ConfigError`] if an explicit file is missing or the merged values
/// do not match [`Settings`].
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    load_config(path)
}

/// A reusable configuration loader that combines a TOML file with environment overrides.
///
/// 1. **Base File**: An explicit `path` must exist. Without one, `dojo.toml` in the
///    working directory is used when present; otherwise defaults apply.
/// 2. **Environment Overrides**: Variables prefixed with `DOJO__` overlay file values.
///    Nested keys use double underscores (`DOJO__OUTPUT__PATH` maps to `output.path`).
///
/// # Errors
/// This function will return an error if:
/// * An explicitly given configuration file cannot be found or parsed.
/// * The merged content does not match the structure of type `T`.
///
/// # Example
/// ```rust,no_run
/// use dojo_domain::config::Settings;
/// use dojo_kernel::config::load_config;
///
/// let settings: Settings = load_config(None).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<&Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match path {
        Some(p) => {
            info!("Loading config from {}", p.display());
            File::from(p).format(FileFormat::Toml).required(true)
        },
        None => {
            debug!("Looking for optional {DEFAULT_CONFIG_NAME}.toml");
            File::with_name(DEFAULT_CONFIG_NAME).format(FileFormat::Toml).required(false)
        },
    };

    let config = Config::builder()
        .add_source(file)
        // Values stay strings; typed fields convert them during deserialization.
        .add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
