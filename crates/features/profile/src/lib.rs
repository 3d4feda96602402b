//! # Build Profiles
//!
//! Everything between a [`BuildProfile`] and the `build.profile.js` text the
//! Dojo bundler reads.
//!
//! * [`validate`]: shape checks run before anything is emitted.
//! * [`render`]: Tera rendering with the built-in template or a custom one.
//! * [`expand`]: `${name}` substitution for hand-written profiles.
//! * [`parse`]: reads descriptors back, so generated output can be checked.
//!
//! ## Example
//!
//! ```rust
//! use dojo_domain::{BuildProfile, Package};
//! use dojo_profile::{parse_profile, render_profile};
//! use std::collections::BTreeMap;
//!
//! let profile = BuildProfile {
//!     base_path: "../dojo-src".into(),
//!     release_dir: "build".into(),
//!     packages: vec![Package::new("dojo", "dojo")],
//!     ..BuildProfile::default()
//! };
//!
//! let text = render_profile(&profile, &BTreeMap::new()).unwrap();
//! assert_eq!(parse_profile(&text).unwrap(), profile);
//! ```

mod error;
pub mod expand;
mod filters;
pub mod parse;
pub mod render;
pub mod validate;

pub use crate::error::{ProfileError, ProfileErrorExt};
pub use crate::expand::{builtin_variables, expand_placeholders};
pub use crate::parse::{JsNode, JsValue, parse_descriptor, parse_profile};
pub use crate::render::{ProfileRenderer, render_profile, write_profile};
pub use crate::validate::validate;
pub use dojo_domain::BuildProfile;
