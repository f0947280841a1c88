//! Token generation for the `Reflect` impl.

use proc_macro2::TokenStream;
use quote::quote;
use syn::LitStr;

use super::parse::{FieldInput, StructInput};

fn optional_str(value: Option<&LitStr>) -> TokenStream {
    value.map_or_else(
        || quote! { ::core::option::Option::None },
        |lit| quote! { ::core::option::Option::Some(#lit) },
    )
}

/// Renders the `FieldSpec` literal for one field.
///
/// The target is chosen by method resolution on a `Probe`: supported
/// primitives first, then `FlagValue` implementors, then `Unsupported`.
fn field_spec(field: &FieldInput, krate: &TokenStream) -> TokenStream {
    let name = &field.name;
    let ty = &field.ty;
    let member = &field.member;
    let exported = field.exported;
    let flag = optional_str(field.attrs.flag.as_ref());
    let default = optional_str(field.attrs.default.as_ref());
    quote! {
        #krate::FieldSpec {
            ident: #name,
            type_name: ::core::any::type_name::<#ty>(),
            exported: #exported,
            flag: #flag,
            default: #default,
            target: (&&#krate::__private::Probe::new(&mut self.#member)).flag_target(),
        }
    }
}

pub(crate) fn reflect_impl(input: &StructInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let specs: Vec<_> = input
        .fields
        .iter()
        .map(|field| field_spec(field, krate))
        .collect();
    let imports = if specs.is_empty() {
        quote! {}
    } else {
        quote! {
            use #krate::__private::via::*;
        }
    };

    quote! {
        impl #impl_generics #krate::Reflect for #ident #ty_generics #where_clause {
            fn reflect_mut(&mut self) -> #krate::Shape<'_> {
                #imports
                #krate::Shape::Record {
                    type_name: ::core::any::type_name::<Self>(),
                    fields: ::std::vec![ #( #specs ),* ],
                }
            }
        }
    }
}
