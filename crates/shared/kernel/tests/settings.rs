use dojo_domain::{Optimizer, SelectorEngine};
use dojo_kernel::config::{ConfigError, load_settings};
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

const SIMPLE_BUILD: &str = r#"
[profile]
base_path = "../dojo-release-1.8.3-src"
release_dir = "build"
layer_optimize = "shrinksafe"
optimize = false
selector_engine = "acme"

[[profile.packages]]
name = "dojo"
location = "dojo"

[[profile.packages]]
name = "evf-example"
location = "../simpleBuild-0.1.0/evf-example"

[profile.boot_layer]
name = "dojo/dojo"
includes = ["dojo/dojo"]

[[profile.layers]]
name = "evf-example/app"
includes = ["evf-example/CustomWidget"]
excludes = ["dojo/dojo"]

[output]
path = "build/build.profile.js"
"#;

#[test]
#[serial]
fn loads_toml_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("dojo.toml");
    fs::write(&path, SIMPLE_BUILD)?;

    let settings = load_settings(Some(&path))?;
    assert_eq!(settings.profile.packages.len(), 2);
    assert_eq!(settings.profile.optimize, Optimizer::Disabled);
    assert_eq!(settings.profile.selector_engine, SelectorEngine::Acme);
    assert_eq!(settings.profile.layers[0].excludes, vec!["dojo/dojo"]);
    assert_eq!(settings.output.path, std::path::PathBuf::from("build/build.profile.js"));
    Ok(())
}

#[test]
#[serial]
fn explicit_missing_file_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let err = load_settings(Some(&dir.path().join("absent.toml"))).expect_err("must fail");
    assert!(matches!(err, ConfigError::Config { .. }));
    assert!(err.to_string().contains("Failed to build config"));
}
