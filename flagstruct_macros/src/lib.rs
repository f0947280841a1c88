//! Procedural macros for `flagstruct`.
//!
//! The [`FlagStruct`] derive implements `flagstruct::Reflect` for a struct.
//! Rust has no runtime reflection, so the derive emits the reflection table
//! at compile time: one `FieldSpec` per declared field, carrying the field's
//! visibility, its `#[flag]` and `#[flag_default]` declarations, and a typed
//! mutable target. The runtime scanner decides which fields become flags.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `flagstruct::Reflect`.
///
/// Recognised attributes:
///
/// - `#[flag = "name,help"]` on a field declares it as a flag.
/// - `#[flag_default = "text"]` on a field supplies literal default text.
/// - `#[flagstruct(crate = "path")]` on the struct overrides the path used
///   to reach the runtime crate.
#[proc_macro_derive(FlagStruct, attributes(flag, flag_default, flagstruct))]
pub fn derive_flag_struct(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
