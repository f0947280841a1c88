//! Compile-time reflection tables for configuration records.
//!
//! `#[derive(FlagStruct)]` implements [`Reflect`] by listing every declared
//! field, flagged or not. Deciding which fields become flags is left to the
//! scanner so the rules live in one place.

use std::time::Duration;

use crate::target::Target;

/// Raw reflection data for one declared field.
#[derive(Debug)]
pub struct FieldSpec<'a> {
    /// Field identifier, or its position for tuple structs.
    pub ident: &'static str,
    /// Declared type of the field.
    pub type_name: &'static str,
    /// Whether the field is `pub`.
    pub exported: bool,
    /// The `#[flag = "..."]` declaration, if any.
    pub flag: Option<&'static str>,
    /// The `#[flag_default = "..."]` declaration, if any.
    pub default: Option<&'static str>,
    /// Mutable reference to the field.
    pub target: Target<'a>,
}

/// Shape of a reflected value.
#[derive(Debug)]
pub enum Shape<'a> {
    /// A struct-like aggregate with named or positional fields.
    Record {
        /// Type of the record.
        type_name: &'static str,
        /// Fields in declaration order.
        fields: Vec<FieldSpec<'a>>,
    },
    /// Anything else: flags cannot be registered on it.
    Scalar {
        /// Type of the value.
        type_name: &'static str,
    },
}

/// Values whose shape can be inspected for flag registration.
///
/// Derive this for configuration structs with `#[derive(FlagStruct)]`.
/// Common scalar types implement it too so that passing one is reported as
/// [`FlagStructError::NotARecord`](crate::FlagStructError::NotARecord)
/// rather than failing to compile.
pub trait Reflect {
    /// Lends mutable access to the value's fields.
    fn reflect_mut(&mut self) -> Shape<'_>;
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn reflect_mut(&mut self) -> Shape<'_> {
        (**self).reflect_mut()
    }
}

macro_rules! scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn reflect_mut(&mut self) -> Shape<'_> {
                    Shape::Scalar {
                        type_name: std::any::type_name::<Self>(),
                    }
                }
            }
        )*
    };
}

scalar! {
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, str, Duration,
}
