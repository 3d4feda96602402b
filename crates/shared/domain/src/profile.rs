//! Build profile model: the values interpolated into a Dojo build descriptor.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// The structured configuration behind a generated `build.profile.js`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildProfile {
    /// Path of the Dojo source tree, relative to the profile file.
    pub base_path: String,
    /// Directory the bundler writes the release into.
    pub release_dir: String,
    /// Name of the release folder inside `release_dir`.
    pub release_name: String,

    pub layer_optimize: Optimizer,
    pub optimize: Optimizer,
    pub css_optimize: CssOptimizer,
    pub mini: bool,
    pub strip_console: StripConsole,
    pub selector_engine: SelectorEngine,

    /// Packages in declaration order.
    pub packages: Vec<Package>,
    /// Layer loaded first at runtime, emitted before every other layer.
    pub boot_layer: Option<BootLayer>,
    /// Remaining layers in declaration order.
    pub layers: Vec<Layer>,
}

impl BuildProfile {
    /// The only action this tool emits.
    pub const ACTION: &'static str = "release";

    /// Looks up a package by name.
    #[must_use]
    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Number of layers including the boot layer.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len() + usize::from(self.boot_layer.is_some())
    }
}

impl Default for BuildProfile {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            release_dir: String::new(),
            release_name: "release".to_owned(),
            layer_optimize: Optimizer::Shrinksafe,
            optimize: Optimizer::Disabled,
            css_optimize: CssOptimizer::Comments,
            mini: false,
            strip_console: StripConsole::Normal,
            selector_engine: SelectorEngine::Acme,
            packages: Vec::new(),
            boot_layer: None,
            layers: Vec::new(),
        }
    }
}

/// A package name/location pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub location: String,
}

impl Package {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self { name: name.into(), location: location.into() }
    }
}

/// A named bundle of modules with explicit include and exclude lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
}

/// The bootstrapping layer. It never carries an exclude list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootLayer {
    pub name: String,
    #[serde(default)]
    pub custom_base: bool,
    #[serde(default)]
    pub includes: Vec<String>,
}

// --- Descriptor flags ---

/// Error returned when a flag value is not one of the known spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFlag {
    pub flag: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} value '{}'", self.flag, self.value)
    }
}

impl std::error::Error for UnknownFlag {}

/// Shared behaviour of the descriptor's enumerated flags.
///
/// A flag is emitted either as a quoted string or, when it can be switched
/// off, as the bare literal `false`.
pub trait DescriptorFlag: FromStr<Err = UnknownFlag> + Copy {
    /// Descriptor key of the flag (e.g., `layerOptimize`).
    const KEY: &'static str;

    /// Descriptor spelling, or `None` when the flag is disabled.
    fn as_descriptor(&self) -> Option<&'static str>;

    /// Value used for a boolean literal, if the flag accepts one.
    fn from_bool(_value: bool) -> Option<Self> {
        None
    }
}

/// Script optimizer used by `layerOptimize` and `optimize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Optimizer {
    Shrinksafe,
    Closure,
    Comments,
    Disabled,
}

impl FromStr for Optimizer {
    type Err = UnknownFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "shrinksafe" => Ok(Self::Shrinksafe),
            "closure" => Ok(Self::Closure),
            "comments" => Ok(Self::Comments),
            "false" | "" => Ok(Self::Disabled),
            other => Err(UnknownFlag { flag: Self::KEY, value: other.to_owned() }),
        }
    }
}

impl DescriptorFlag for Optimizer {
    const KEY: &'static str = "optimize";

    fn as_descriptor(&self) -> Option<&'static str> {
        match self {
            Self::Shrinksafe => Some("shrinksafe"),
            Self::Closure => Some("closure"),
            Self::Comments => Some("comments"),
            Self::Disabled => None,
        }
    }

    fn from_bool(value: bool) -> Option<Self> {
        (!value).then_some(Self::Disabled)
    }
}

/// CSS optimizer used by `cssOptimize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CssOptimizer {
    Comments,
    CommentsKeepLines,
    Disabled,
}

impl FromStr for CssOptimizer {
    type Err = UnknownFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "comments" => Ok(Self::Comments),
            "comments.keepLines" => Ok(Self::CommentsKeepLines),
            "false" | "" => Ok(Self::Disabled),
            other => Err(UnknownFlag { flag: Self::KEY, value: other.to_owned() }),
        }
    }
}

impl DescriptorFlag for CssOptimizer {
    const KEY: &'static str = "cssOptimize";

    fn as_descriptor(&self) -> Option<&'static str> {
        match self {
            Self::Comments => Some("comments"),
            Self::CommentsKeepLines => Some("comments.keepLines"),
            Self::Disabled => None,
        }
    }

    fn from_bool(value: bool) -> Option<Self> {
        (!value).then_some(Self::Disabled)
    }
}

/// Which `console.*` calls the bundler strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StripConsole {
    None,
    Normal,
    Warn,
    All,
}

impl FromStr for StripConsole {
    type Err = UnknownFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" => Ok(Self::None),
            "normal" => Ok(Self::Normal),
            "warn" => Ok(Self::Warn),
            "all" => Ok(Self::All),
            other => Err(UnknownFlag { flag: Self::KEY, value: other.to_owned() }),
        }
    }
}

impl DescriptorFlag for StripConsole {
    const KEY: &'static str = "stripConsole";

    fn as_descriptor(&self) -> Option<&'static str> {
        Some(match self {
            Self::None => "none",
            Self::Normal => "normal",
            Self::Warn => "warn",
            Self::All => "all",
        })
    }
}

/// CSS selector engine baked into the release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorEngine {
    Acme,
    Lite,
}

impl FromStr for SelectorEngine {
    type Err = UnknownFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "acme" => Ok(Self::Acme),
            "lite" => Ok(Self::Lite),
            other => Err(UnknownFlag { flag: Self::KEY, value: other.to_owned() }),
        }
    }
}

impl DescriptorFlag for SelectorEngine {
    const KEY: &'static str = "selectorEngine";

    fn as_descriptor(&self) -> Option<&'static str> {
        Some(match self {
            Self::Acme => "acme",
            Self::Lite => "lite",
        })
    }
}

macro_rules! flag_serde {
    ($($ty:ty),+ $(,)?) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_descriptor().unwrap_or("false"))
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self.as_descriptor() {
                    Some(value) => serializer.serialize_str(value),
                    None => serializer.serialize_bool(false),
                }
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any(FlagVisitor::<$ty>(PhantomData))
            }
        }
    )+};
}

flag_serde!(Optimizer, CssOptimizer, StripConsole, SelectorEngine);

struct FlagVisitor<T>(PhantomData<T>);

impl<T: DescriptorFlag> Visitor<'_> for FlagVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a {} value", T::KEY)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<T, E> {
        T::from_bool(v).ok_or_else(|| E::invalid_value(de::Unexpected::Bool(v), &self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_optimizer_accepts_bool_and_string() {
        assert_eq!("false".parse::<Optimizer>().unwrap(), Optimizer::Disabled);
        assert_eq!(Optimizer::from_bool(false), Some(Optimizer::Disabled));
        assert_eq!(Optimizer::from_bool(true), None);
    }

    #[test]
    fn flags_display_descriptor_spelling() {
        assert_eq!(Optimizer::Shrinksafe.to_string(), "shrinksafe");
        assert_eq!(Optimizer::Disabled.to_string(), "false");
        assert_eq!(CssOptimizer::CommentsKeepLines.to_string(), "comments.keepLines");
        assert_eq!(StripConsole::Warn.to_string(), "warn");
    }

    #[test]
    fn unknown_flag_names_the_key() {
        let err = "fastest".parse::<SelectorEngine>().unwrap_err();
        assert_eq!(err.to_string(), "unknown selectorEngine value 'fastest'");
    }

    #[test]
    fn layer_count_includes_boot_layer() {
        let mut profile = BuildProfile::default();
        profile.layers.push(Layer { name: "app".into(), includes: vec![], excludes: vec![] });
        assert_eq!(profile.layer_count(), 1);
        profile.boot_layer =
            Some(BootLayer { name: "dojo/dojo".into(), custom_base: false, includes: vec![] });
        assert_eq!(profile.layer_count(), 2);
    }
}
