//! # Resource Tags
//!
//! Decides how the bundler treats each file of a package: as a test, as a
//! copy-only file or as an AMD module. The same rules are available in three
//! forms:
//!
//! * [`ResourceRules::classify`] for a single file,
//! * [`scan`] for a whole package tree,
//! * [`render_package_descriptor`] for the `package.js` the bundler evaluates.
//!
//! Every file receives exactly one [`ResourceTag`]: tests first, then
//! copy-only files, then scripts.

pub mod classify;
mod error;
pub mod package_descriptor;
pub mod scan;

pub use crate::classify::{ResourceRules, ResourceTag, TagSet};
pub use crate::error::{ResourceError, ResourceErrorExt};
pub use crate::package_descriptor::{
    render_package_descriptor, render_rules, write_package_descriptor,
};
pub use crate::scan::{ClassifiedResource, TagSummary, scan};
