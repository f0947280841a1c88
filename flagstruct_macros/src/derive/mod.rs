//! Expansion of `#[derive(FlagStruct)]`.
//!
//! Parsing gathers the struct shape and attribute metadata in one pass so
//! invalid input fails fast; generation then renders the `Reflect` impl.

mod crate_path;
mod generate;
mod parse;

use proc_macro2::TokenStream;

/// Expands the derive for `input`, returning the generated impl.
pub(crate) fn expand(input: &syn::DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = crate_path::resolve(parsed.attrs.crate_path.as_ref());
    Ok(generate::reflect_impl(&parsed, &krate))
}
