//! Classification of a whole package source tree.

use crate::classify::{ResourceRules, ResourceTag};
use crate::error::{ResourceError, ResourceErrorExt};
use std::fmt;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// A file of the package and the tag it receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedResource {
    /// Module id: `package/relative/path`, `.js` stripped.
    pub mid: String,
    pub path: PathBuf,
    pub tag: ResourceTag,
}

/// Resource counts per tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagSummary {
    pub test: usize,
    pub copy_only: usize,
    pub amd: usize,
    pub untagged: usize,
}

impl TagSummary {
    pub const fn record(&mut self, tag: ResourceTag) {
        match tag {
            ResourceTag::Test => self.test += 1,
            ResourceTag::CopyOnly => self.copy_only += 1,
            ResourceTag::Amd => self.amd += 1,
            ResourceTag::Untagged => self.untagged += 1,
        }
    }

    #[must_use]
    pub const fn count(&self, tag: ResourceTag) -> usize {
        match tag {
            ResourceTag::Test => self.test,
            ResourceTag::CopyOnly => self.copy_only,
            ResourceTag::Amd => self.amd,
            ResourceTag::Untagged => self.untagged,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.test + self.copy_only + self.amd + self.untagged
    }
}

impl<'a> FromIterator<&'a ClassifiedResource> for TagSummary {
    fn from_iter<I: IntoIterator<Item = &'a ClassifiedResource>>(iter: I) -> Self {
        let mut summary = Self::default();
        for resource in iter {
            summary.record(resource.tag);
        }
        summary
    }
}

impl fmt::Display for TagSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> =
            ResourceTag::iter().map(|tag| format!("{tag}: {}", self.count(tag))).collect();
        write!(f, "{} resources ({})", self.total(), parts.join(", "))
    }
}

/// Walks `package_root` and classifies every file with `rules`.
///
/// Mids are `rules.package()` joined with the path relative to
/// `package_root`. Hidden files and directories are skipped. The result is
/// sorted by mid.
///
/// # Errors
/// Returns [`ResourceError::Walk`] if the tree cannot be read.
pub fn scan(
    rules: &ResourceRules,
    package_root: &Path,
) -> Result<Vec<ClassifiedResource>, ResourceError> {
    let mut resources = Vec::new();

    let walker = WalkDir::new(package_root).follow_links(true).into_iter();
    for entry in walker.filter_entry(is_visible) {
        let entry =
            entry.context(format!("Failed to read directory {}", package_root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some((filename, mid)) = module_id(rules.package(), package_root, &entry) else {
            debug!(path = %entry.path().display(), "Skipping file with a non UTF-8 path");
            continue;
        };

        let tag = rules.classify(&filename, &mid);
        trace!(%mid, %tag, "Classified resource");
        resources.push(ClassifiedResource { mid, path: entry.into_path(), tag });
    }

    resources.sort_by(|a, b| a.mid.cmp(&b.mid));
    debug!(
        package = rules.package(),
        root = %package_root.display(),
        count = resources.len(),
        "Scanned package resources"
    );
    Ok(resources)
}

fn is_visible(entry: &DirEntry) -> bool {
    entry.depth() == 0 || !entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

fn module_id(package: &str, root: &Path, entry: &DirEntry) -> Option<(String, String)> {
    let filename = entry.file_name().to_str()?.to_owned();
    let relative = entry.path().strip_prefix(root).ok()?;
    let segments =
        relative.components().map(|c| c.as_os_str().to_str()).collect::<Option<Vec<_>>>()?;
    let joined = segments.join("/");
    let mid = format!("{package}/{}", joined.strip_suffix(".js").unwrap_or(&joined));
    Some((filename, mid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_and_display() {
        let mut summary = TagSummary::default();
        summary.record(ResourceTag::Amd);
        summary.record(ResourceTag::Amd);
        summary.record(ResourceTag::Test);
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.to_string(), "3 resources (test: 1, copyOnly: 0, amd: 2, untagged: 0)");
    }
}
