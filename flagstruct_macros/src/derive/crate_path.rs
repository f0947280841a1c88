//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[flagstruct(crate = "...")]` attribute value
//! into a `TokenStream` that replaces the `flagstruct::` paths in generated
//! code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// Defaults to `flagstruct` when no override is present.
///
/// # Examples
///
/// ```rust,ignore
/// let default = resolve(None);
/// assert_eq!(default.to_string(), "flagstruct");
///
/// let path: syn::Path = syn::parse_str("flags").unwrap();
/// assert_eq!(resolve(Some(&path)).to_string(), "flags");
/// ```
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { flagstruct }, |path| quote! { #path })
}
