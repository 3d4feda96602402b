use dojo_domain::config::ResourceConfig;
use dojo_resources::{ResourceError, ResourceRules, ResourceTag, TagSummary, scan};
use std::fs;
use std::path::Path;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "").unwrap();
}

#[test]
fn scan_classifies_the_example_package() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for file in [
        "CustomWidget.js",
        "package.js",
        "package.json",
        "templates/CustomWidget.html",
        "resources/CustomWidget.css",
        "resources/nls/strings.js",
        "images/logo.png",
        "tests/module.js",
        "tests/data/fixture.json",
        ".hidden.js",
        ".git/config",
    ] {
        touch(root, file);
    }

    let rules = ResourceRules::from_config(&ResourceConfig::default(), "evf-example").unwrap();
    let resources = scan(&rules, root).unwrap();
    let tagged: Vec<(&str, ResourceTag)> =
        resources.iter().map(|r| (r.mid.as_str(), r.tag)).collect();

    assert_eq!(tagged, vec![
        ("evf-example/CustomWidget", ResourceTag::Amd),
        ("evf-example/images/logo.png", ResourceTag::CopyOnly),
        ("evf-example/package", ResourceTag::CopyOnly),
        ("evf-example/package.json", ResourceTag::CopyOnly),
        ("evf-example/resources/CustomWidget.css", ResourceTag::Untagged),
        ("evf-example/resources/nls/strings", ResourceTag::CopyOnly),
        ("evf-example/templates/CustomWidget.html", ResourceTag::Untagged),
        ("evf-example/tests/data/fixture.json", ResourceTag::Test),
        ("evf-example/tests/module", ResourceTag::Test),
    ]);

    let summary: TagSummary = resources.iter().collect();
    assert_eq!(summary, TagSummary { test: 2, copy_only: 4, amd: 1, untagged: 2 });
}

#[test]
fn scan_of_a_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let rules = ResourceRules::from_config(&ResourceConfig::default(), "app").unwrap();
    let err = scan(&rules, &dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, ResourceError::Walk { .. }));
}
