use crate::profile::BuildProfile;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Top-level tool configuration, usually read from `dojo.toml`.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub profile: BuildProfile,
    pub output: OutputConfig,
    pub resources: ResourceConfig,
    pub logging: LoggingConfig,
    pub runner: RunnerConfig,
}

impl Settings {
    /// Package whose resources get classified: the configured one, or the last
    /// declared package (application packages follow the toolkit ones).
    #[must_use]
    pub fn resource_package(&self) -> Option<&str> {
        self.resources
            .package
            .as_deref()
            .or_else(|| self.profile.packages.last().map(|p| p.name.as_str()))
    }
}

/// Where and how the descriptor is written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    /// Custom Tera template replacing the built-in descriptor template.
    pub template: Option<PathBuf>,
    /// Extra values exposed to templates and `${name}` expansion.
    pub variables: BTreeMap<String, String>,
}

/// Resource tagging rules for the `package.js` descriptor and `classify`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub package: Option<String>,
    /// Root that contains one directory per package.
    pub source_dir: PathBuf,
    /// Extra module ids tagged copy-only, on top of the package descriptors.
    pub copy_only: Vec<String>,
    /// File extensions always tagged copy-only.
    pub copy_only_extensions: Vec<String>,
    /// Package-relative directories holding tests.
    pub test_dirs: Vec<String>,
    /// Package-relative directories whose non-CSS files are copied verbatim.
    pub resource_dirs: Vec<String>,
}

/// Logging options; CLI verbosity flags take precedence over `level`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub filter: Option<String>,
    pub path: Option<PathBuf>,
    pub json: bool,
}

/// External bundler invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

// --- Default ---

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("build.profile.js"), template: None, variables: BTreeMap::new() }
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            package: None,
            source_dir: PathBuf::from("src/js"),
            copy_only: Vec::new(),
            copy_only_extensions: ["png", "jpg", "jpeg", "gif", "tiff"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            test_dirs: vec!["tests".to_owned()],
            resource_dirs: vec!["resources".to_owned()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, path: None, json: false }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: "node".to_owned(),
            args: vec!["dojo/dojo.js".to_owned(), "load=build".to_owned()],
            working_dir: None,
        }
    }
}
