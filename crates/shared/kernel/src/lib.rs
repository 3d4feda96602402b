//! Kernel utilities shared by the Dojo Builder front ends.
//! Keep this crate lightweight; today it owns the layered settings loader.
//!
//! ## Config loading
//! ```rust,no_run
//! use dojo_kernel::config::load_settings;
//!
//! let settings = load_settings(Some(std::path::Path::new("dojo.toml"))).unwrap();
//! println!("{} packages", settings.profile.packages.len());
//! ```

pub mod config;
