use dojo_domain::{
    BootLayer, BuildProfile, CssOptimizer, Layer, Optimizer, Package, SelectorEngine, StripConsole,
};
use dojo_profile::{parse_profile, render_profile};
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn module_id() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,6}(/[A-Za-z][A-Za-z0-9_.]{0,8}){0,2}"
}

fn path() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.][A-Za-z0-9_./: -]{0,20}"
}

fn optimizer() -> impl Strategy<Value = Optimizer> {
    prop_oneof![
        Just(Optimizer::Shrinksafe),
        Just(Optimizer::Closure),
        Just(Optimizer::Comments),
        Just(Optimizer::Disabled),
    ]
}

type Flags = (Optimizer, Optimizer, CssOptimizer, StripConsole, SelectorEngine, bool);

fn flags() -> impl Strategy<Value = Flags> {
    (
        optimizer(),
        optimizer(),
        prop_oneof![
            Just(CssOptimizer::Comments),
            Just(CssOptimizer::CommentsKeepLines),
            Just(CssOptimizer::Disabled),
        ],
        prop_oneof![
            Just(StripConsole::None),
            Just(StripConsole::Normal),
            Just(StripConsole::Warn),
            Just(StripConsole::All),
        ],
        prop_oneof![Just(SelectorEngine::Acme), Just(SelectorEngine::Lite)],
        any::<bool>(),
    )
}

fn boot_layer() -> impl Strategy<Value = Option<BootLayer>> {
    proptest::option::of((module_id(), any::<bool>(), vec(module_id(), 1..4)).prop_map(
        |(name, custom_base, includes)| BootLayer { name, custom_base, includes },
    ))
}

fn profile() -> impl Strategy<Value = BuildProfile> {
    (
        (path(), path(), "[a-z][a-z0-9-]{0,10}"),
        flags(),
        btree_map("[a-z][a-z0-9-]{0,8}", path(), 0..5),
        boot_layer(),
        btree_map(module_id(), (vec(module_id(), 0..4), vec(module_id(), 0..3)), 0..4),
    )
        .prop_map(|(scalars, flags, packages, boot_layer, layers)| {
            let (base_path, release_dir, release_name) = scalars;
            let (layer_optimize, optimize, css_optimize, strip_console, selector_engine, mini) =
                flags;
            let boot_name = boot_layer.as_ref().map(|b| b.name.clone());
            BuildProfile {
                base_path,
                release_dir,
                release_name,
                layer_optimize,
                optimize,
                css_optimize,
                mini,
                strip_console,
                selector_engine,
                packages: packages.into_iter().map(|(n, l)| Package::new(n, l)).collect(),
                layers: layers
                    .into_iter()
                    .filter(|(name, _)| Some(name) != boot_name.as_ref())
                    .map(|(name, (includes, excludes))| Layer { name, includes, excludes })
                    .collect(),
                boot_layer,
            }
        })
}

proptest! {
    #[test]
    fn rendered_profiles_parse_back_unchanged(profile in profile()) {
        let text = render_profile(&profile, &BTreeMap::new()).unwrap();
        let parsed = parse_profile(&text).unwrap();
        prop_assert_eq!(parsed, profile);
    }

    #[test]
    fn boot_layer_is_always_the_first_layer(profile in profile()) {
        let text = render_profile(&profile, &BTreeMap::new()).unwrap();
        if let Some(boot) = &profile.boot_layer {
            let layers = text.find("layers: {").unwrap();
            let first = text[layers..].find(":{").unwrap() + layers;
            let key = format!("'{}'", boot.name);
            prop_assert!(text[..first].ends_with(&key));
            prop_assert_eq!(text.matches("boot: true").count(), 1);
        } else {
            prop_assert!(!text.contains("boot: true"));
        }
    }
}
