#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros used across the workspace. At the moment this is a single
//! attribute, [`macro@dojo_error`], which turns a plain enum into a crate error type.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! dojo-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining crate-level error enums.
///
/// # Features
///
/// * **Automatic Derives**: Adds `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait with `.context(...)` for
///   `Result<T, Name>` and for `Result<T, Source>` of every wrapped source type.
/// * **Conversions**: `From<Source>` for variants carrying a `source` field (or a field
///   marked `#[source]`/`#[from]`), so `?` works on upstream errors.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
/// * **Formatting helper**: a private `format_context` function usable in `#[error(...)]`.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields. Tuple and unit variants are rejected.
/// 3. A variant with a source must also declare `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use dojo_derive::dojo_error;
/// use std::borrow::Cow;
///
/// #[dojo_error]
/// pub enum ProfileError {
///     #[error("I/O error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, ProfileError> {
///     std::fs::read_to_string(path).context("Reading profile")
/// }
/// ```
#[proc_macro_attribute]
pub fn dojo_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
