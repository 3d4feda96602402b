//! # Domain Models
//!
//! Pure data shared by every Dojo Builder crate: the build profile that ends up
//! in `build.profile.js` and the tool settings around it.
//! Keep it lean: no I/O and no rendering, just data and simple helpers.

pub mod config;
pub mod profile;

pub use crate::profile::{
    BootLayer, BuildProfile, CssOptimizer, DescriptorFlag, Layer, Optimizer, Package,
    SelectorEngine, StripConsole, UnknownFlag,
};
