//! Resource tag rules, evaluated the way the bundler's `resourceTags` functions are.

use crate::error::ResourceError;
use bitflags::bitflags;
use dojo_domain::config::ResourceConfig;
use fxhash::FxHashSet;
use regex::Regex;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

/// Package-relative files every package ships verbatim.
const DESCRIPTOR_FILES: [&str; 3] = ["package", "package.js", "package.json"];

/// The single tag a resource receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum ResourceTag {
    Test,
    CopyOnly,
    Amd,
    Untagged,
}

bitflags! {
    /// Tag predicates that hold for a resource.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TagSet: u8 {
        const TEST = 1 << 0;
        const COPY_ONLY = 1 << 1;
        const AMD = 1 << 2;
    }
}

impl From<ResourceTag> for TagSet {
    fn from(tag: ResourceTag) -> Self {
        match tag {
            ResourceTag::Test => Self::TEST,
            ResourceTag::CopyOnly => Self::COPY_ONLY,
            ResourceTag::Amd => Self::AMD,
            ResourceTag::Untagged => Self::empty(),
        }
    }
}

/// Compiled tagging rules for one package.
///
/// A resource is a test when its mid lies in a test directory, copy-only when
/// it is a package descriptor, an explicitly listed mid, a non-CSS file in a
/// resource directory or an image, and AMD when it is any other `.js` file.
/// Tests win over copy-only, copy-only wins over AMD.
#[derive(Debug, Clone)]
pub struct ResourceRules {
    package: String,
    test_dirs: Vec<String>,
    resource_dirs: Vec<String>,
    copy_only: Vec<String>,
    extensions: Vec<String>,

    test_mids: FxHashSet<String>,
    copy_only_mids: FxHashSet<String>,
    test_prefix: Option<Regex>,
    resource_prefix: Option<Regex>,
    image: Option<Regex>,
    css: Regex,
    script: Regex,
}

impl ResourceRules {
    /// Compiles the rules of `config` for `package`.
    ///
    /// # Errors
    /// Returns [`ResourceError::InvalidRule`] for an unusable package or directory
    /// name and [`ResourceError::Pattern`] if a rule does not compile.
    pub fn from_config(config: &ResourceConfig, package: &str) -> Result<Self, ResourceError> {
        let package = package.trim().trim_matches('/');
        if package.is_empty() || !is_safe_path(package) {
            return Err(invalid_rule(package, "package names must be non-empty relative paths"));
        }

        let test_dirs = normalize_dirs(&config.test_dirs)?;
        let resource_dirs = normalize_dirs(&config.resource_dirs)?;

        let mut copy_only: Vec<String> = DESCRIPTOR_FILES
            .iter()
            .map(|file| format!("{package}/{file}"))
            .chain(config.copy_only.iter().map(|mid| mid.trim().to_owned()))
            .filter(|mid| !mid.is_empty())
            .collect();
        let mut seen = FxHashSet::default();
        copy_only.retain(|mid| seen.insert(mid.clone()));

        let mut extensions: Vec<String> = Vec::with_capacity(config.copy_only_extensions.len());
        for ext in &config.copy_only_extensions {
            let ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
            if !is_emittable(&ext) || ext.contains('/') {
                return Err(invalid_rule(&ext, "extensions must be plain file suffixes"));
            }
            if !ext.is_empty() {
                extensions.push(ext);
            }
        }

        let rules = Self {
            test_mids: test_dirs.iter().map(|dir| format!("{package}/{dir}")).collect(),
            copy_only_mids: seen,
            test_prefix: prefix_pattern(package, &test_dirs)?,
            resource_prefix: prefix_pattern(package, &resource_dirs)?,
            image: suffix_pattern(&extensions)?,
            css: Regex::new(r"\.css$")?,
            script: Regex::new(r"\.js$")?,
            package: package.to_owned(),
            test_dirs,
            resource_dirs,
            copy_only,
            extensions,
        };
        debug!(package = %rules.package, "Compiled resource rules");
        Ok(rules)
    }

    /// Package the rules were compiled for.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Package-relative test directories.
    #[must_use]
    pub fn test_dirs(&self) -> &[String] {
        &self.test_dirs
    }

    /// Package-relative resource directories.
    #[must_use]
    pub fn resource_dirs(&self) -> &[String] {
        &self.resource_dirs
    }

    /// Module ids always tagged copy-only, descriptors first.
    #[must_use]
    pub fn copy_only(&self) -> &[String] {
        &self.copy_only
    }

    /// Lower-case extensions, without the dot, tagged copy-only.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    #[must_use]
    pub fn is_test(&self, mid: &str) -> bool {
        self.test_mids.contains(mid) || self.test_prefix.as_ref().is_some_and(|re| re.is_match(mid))
    }

    #[must_use]
    pub fn is_copy_only(&self, filename: &str, mid: &str) -> bool {
        self.copy_only_mids.contains(mid)
            || (self.resource_prefix.as_ref().is_some_and(|re| re.is_match(mid))
                && !self.css.is_match(filename))
            || self.image.as_ref().is_some_and(|re| re.is_match(filename))
    }

    /// The one tag `filename`/`mid` receives.
    #[must_use]
    pub fn classify(&self, filename: &str, mid: &str) -> ResourceTag {
        if self.is_test(mid) {
            ResourceTag::Test
        } else if self.is_copy_only(filename, mid) {
            ResourceTag::CopyOnly
        } else if self.script.is_match(filename) {
            ResourceTag::Amd
        } else {
            ResourceTag::Untagged
        }
    }

    /// Predicate results as a set; at most one flag is ever set.
    #[must_use]
    pub fn tags(&self, filename: &str, mid: &str) -> TagSet {
        self.classify(filename, mid).into()
    }
}

fn invalid_rule(rule: &str, reason: &'static str) -> ResourceError {
    ResourceError::InvalidRule { rule: rule.to_owned(), reason: reason.into(), context: None }
}

/// Survives a JavaScript string, regex literal and block comment unchanged.
fn is_emittable(value: &str) -> bool {
    !value.chars().any(|c| matches!(c, '\'' | '"' | '\\' | '*') || c.is_control())
}

fn is_safe_path(path: &str) -> bool {
    !path.starts_with('/')
        && is_emittable(path)
        && path.split('/').all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

fn normalize_dirs(dirs: &[String]) -> Result<Vec<String>, ResourceError> {
    let mut out: Vec<String> = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let trimmed = dir.trim().trim_end_matches('/');
        if trimmed.is_empty() || !is_safe_path(trimmed) {
            return Err(invalid_rule(dir, "directories must be package-relative paths"));
        }
        if !out.iter().any(|d| d == trimmed) {
            out.push(trimmed.to_owned());
        }
    }
    Ok(out)
}

/// `^(?:pkg/a/|pkg/b/)`, or nothing for an empty list.
fn prefix_pattern(package: &str, dirs: &[String]) -> Result<Option<Regex>, ResourceError> {
    if dirs.is_empty() {
        return Ok(None);
    }
    let alternatives: Vec<String> =
        dirs.iter().map(|dir| regex::escape(&format!("{package}/{dir}/"))).collect();
    Ok(Some(Regex::new(&format!("^(?:{})", alternatives.join("|")))?))
}

/// `(?i)\.(?:png|jpg)$`, or nothing for an empty list.
fn suffix_pattern(extensions: &[String]) -> Result<Option<Regex>, ResourceError> {
    if extensions.is_empty() {
        return Ok(None);
    }
    let alternatives: Vec<String> = extensions.iter().map(|ext| regex::escape(ext)).collect();
    Ok(Some(Regex::new(&format!(r"(?i)\.(?:{})$", alternatives.join("|")))?))
}
