//! Input parsing for the `FlagStruct` derive macro.
//!
//! Gathers the struct identifier, generics, fields, and attribute metadata in
//! one pass so macro expansion can fail fast with useful errors.

use syn::ext::IdentExt as _;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Index, Lit, LitStr, Member, Meta,
    Visibility,
};

/// Struct-level attributes recognised by `#[derive(FlagStruct)]`.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// Field-level declarations: `#[flag = "..."]` and `#[flag_default = "..."]`.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub flag: Option<LitStr>,
    pub default: Option<LitStr>,
}

pub(crate) struct FieldInput {
    /// Name reported at run time: the identifier, or the index for tuple
    /// structs.
    pub name: String,
    pub member: Member,
    pub ty: syn::Type,
    /// Only `pub` fields count as exported; restricted visibility does not.
    pub exported: bool,
    pub attrs: FieldAttrs,
}

pub(crate) struct StructInput {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub attrs: StructAttrs,
    pub fields: Vec<FieldInput>,
}

/// Extracts `#[flagstruct(...)]` metadata applied to a struct.
///
/// Only the `crate` key is recognised; anything else is rejected so typos
/// surface at compile time.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("flagstruct")) {
        attr.parse_nested_meta(|meta| {
            match meta.path.get_ident().map(ToString::to_string).as_deref() {
                Some("crate") => {
                    let lit = meta.value()?.parse::<LitStr>()?;
                    let path: syn::Path = syn::parse_str(&lit.value())
                        .map_err(|e| syn::Error::new(lit.span(), e))?;
                    out.crate_path = Some(path);
                    Ok(())
                }
                _ => Err(meta.error("unknown flagstruct attribute; expected `crate`")),
            }
        })?;
    }
    Ok(out)
}

/// Reads the string literal of a `#[key = "..."]` attribute.
fn lit_str(attr: &Attribute, key: &str) -> syn::Result<LitStr> {
    let Meta::NameValue(nv) = &attr.meta else {
        return Err(syn::Error::new_spanned(
            attr,
            format!("expected `#[{key} = \"...\"]`"),
        ));
    };
    match &nv.value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.clone()),
        other => Err(syn::Error::new_spanned(
            other,
            format!("{key} must be a string"),
        )),
    }
}

fn assign_once(slot: &mut Option<LitStr>, attr: &Attribute, key: &str) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new_spanned(
            attr,
            format!("duplicate `{key}` attribute"),
        ));
    }
    *slot = Some(lit_str(attr, key)?);
    Ok(())
}

pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in attrs {
        if attr.path().is_ident("flag") {
            assign_once(&mut out.flag, attr, "flag")?;
        } else if attr.path().is_ident("flag_default") {
            assign_once(&mut out.default, attr, "flag_default")?;
        }
    }
    Ok(out)
}

/// Gathers information from the user-provided struct.
///
/// Named, tuple, and unit structs are accepted. Enums and unions have no
/// fields to bind and are rejected.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<StructInput> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "FlagStruct can only be derived for structs",
        ));
    };
    let attrs = parse_struct_attrs(&input.attrs)?;

    let mut fields = Vec::new();
    match &data.fields {
        Fields::Named(named) => {
            for field in &named.named {
                let Some(ident) = field.ident.as_ref() else {
                    continue;
                };
                fields.push(FieldInput {
                    name: ident.unraw().to_string(),
                    member: Member::Named(ident.clone()),
                    ty: field.ty.clone(),
                    exported: matches!(field.vis, Visibility::Public(_)),
                    attrs: parse_field_attrs(&field.attrs)?,
                });
            }
        }
        Fields::Unnamed(unnamed) => {
            for (position, field) in unnamed.unnamed.iter().enumerate() {
                let index = Index::from(position);
                fields.push(FieldInput {
                    name: position.to_string(),
                    member: Member::Unnamed(index),
                    ty: field.ty.clone(),
                    exported: matches!(field.vis, Visibility::Public(_)),
                    attrs: parse_field_attrs(&field.attrs)?,
                });
            }
        }
        Fields::Unit => {}
    }

    Ok(StructInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        attrs,
        fields,
    })
}
