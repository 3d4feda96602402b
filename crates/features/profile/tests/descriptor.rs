use dojo_domain::{BootLayer, BuildProfile, Layer, Optimizer, Package};
use dojo_profile::{
    ProfileError, ProfileRenderer, builtin_variables, expand_placeholders, parse_profile,
    render_profile, write_profile,
};
use std::collections::BTreeMap;
use std::fs;

const SIMPLE_BUILD: &str = include_str!("fixtures/simple_build.profile.js");
const HAND_WRITTEN: &str = include_str!("fixtures/hand_written.profile.js");

fn simple_build() -> BuildProfile {
    BuildProfile {
        base_path: "../dojo-release-1.8.3-src".into(),
        release_dir: "C:/Source/simpleBuild/build".into(),
        packages: vec![
            Package::new("dojo", "dojo"),
            Package::new("dijit", "dijit"),
            Package::new("dojox", "dojox"),
            Package::new("evf-example", "../simpleBuild-0.1.0/evf-example"),
        ],
        boot_layer: Some(BootLayer {
            name: "dojo/dojo".into(),
            custom_base: false,
            includes: vec!["dojo/dojo".into()],
        }),
        layers: vec![Layer {
            name: "evf-example/app".into(),
            includes: vec!["evf-example/CustomWidget".into()],
            excludes: vec!["dojo/dojo".into()],
        }],
        ..BuildProfile::default()
    }
}

#[test]
fn reference_descriptor_parses_into_the_expected_profile() {
    assert_eq!(parse_profile(SIMPLE_BUILD).unwrap(), simple_build());
}

#[test]
fn generated_descriptor_matches_the_reference_shape() {
    let text = render_profile(&simple_build(), &BTreeMap::new()).unwrap();
    for line in [
        " var profile = (function(){",
        "\t/* Generated profile built by Dojo Builder */",
        "        releaseDir:     \"C:/Source/simpleBuild/build\",",
        "        layerOptimize:\t\"shrinksafe\",",
        "        optimize:\t\tfalse,",
        "        cssOptimize:    \"comments\",",
        "        stripConsole:\t\"normal\",",
        "\t\t\t{name: 'evf-example', location: '../simpleBuild-0.1.0/evf-example'}",
        "        \t'dojo/dojo':{",
        "        \t'evf-example/app':{",
        "})();",
    ] {
        assert!(text.lines().any(|l| l == line), "missing line {line:?} in\n{text}");
    }
    assert_eq!(parse_profile(&text).unwrap(), simple_build());
}

#[test]
fn hand_written_profile_expands_and_parses() {
    let profile = simple_build();
    let mut extra = BTreeMap::new();
    extra.insert("sourceDestination".to_owned(), "simpleBuild-0.1.0".to_owned());

    let text = expand_placeholders(HAND_WRITTEN, &builtin_variables(&profile, &extra)).unwrap();
    let parsed = parse_profile(&text).unwrap();

    assert_eq!(parsed.base_path, "../dojo-release-1.8.3-src");
    assert_eq!(parsed.packages, profile.packages);
    assert!(parsed.boot_layer.is_none());
    assert_eq!(parsed.layers.len(), 1);
    assert_eq!(parsed.layers[0].name, "evf-example/core");
    assert_eq!(parsed.layers[0].includes.len(), 4);
    assert!(parsed.layers[0].excludes.is_empty());
}

#[test]
fn hand_written_profile_reports_missing_variables() {
    let vars = builtin_variables(&simple_build(), &BTreeMap::new());
    let err = expand_placeholders(HAND_WRITTEN, &vars).unwrap_err();
    assert!(matches!(
        err,
        ProfileError::MissingVariables { ref names, .. } if names == &["sourceDestination"]
    ));
}

#[test]
fn custom_template_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("custom.profile.js.tera");
    fs::write(
        &template,
        concat!(
            "var profile = { basePath: {{ profile.base_path | js_value }}, ",
            "optimize: {{ profile.optimize | js_value }}, ",
            "packages: [{% for p in profile.packages %}",
            "{ name: {{ p.name | js_id }} },",
            "{% endfor %}] };",
        ),
    )
    .unwrap();

    let renderer = ProfileRenderer::from_path(&template).unwrap();
    assert_eq!(renderer.template_name(), "custom.profile.js.tera");

    let mut profile = simple_build();
    profile.optimize = Optimizer::Comments;
    let text = renderer.render(&profile, &BTreeMap::new()).unwrap();
    let parsed = parse_profile(&text).unwrap();
    assert_eq!(parsed.optimize, Optimizer::Comments);
    // A package without a location resolves next to its name.
    assert_eq!(parsed.packages[3], Package::new("evf-example", "evf-example"));
}

#[test]
fn missing_template_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ProfileRenderer::from_path(&dir.path().join("absent.tera")).unwrap_err();
    assert!(matches!(err, ProfileError::Io { .. }));
    assert!(err.to_string().contains("Failed to read template"));
}

#[test]
fn write_profile_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out/nested/build.profile.js");
    write_profile(&path, SIMPLE_BUILD).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), SIMPLE_BUILD);
}
