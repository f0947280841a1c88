//! Typed mutable references into configuration fields.

use std::fmt;
use std::time::Duration;

use crate::value::{
    FlagValue, Kind, ValueError, parse_bool, parse_duration, parse_float, parse_signed,
    parse_unsigned, render_duration,
};

/// Mutable reference to one field, tagged with the field's kind.
///
/// The reference borrows the caller's record for `'a`, so a target can never
/// outlive the record it points into.
pub enum Target<'a> {
    /// `bool` field.
    Bool(&'a mut bool),
    /// `i32` field.
    Int(&'a mut i32),
    /// `i64` field.
    Int64(&'a mut i64),
    /// `u32` field.
    Uint(&'a mut u32),
    /// `u64` field.
    Uint64(&'a mut u64),
    /// `f64` field.
    Float64(&'a mut f64),
    /// `std::time::Duration` field.
    Duration(&'a mut Duration),
    /// `String` field.
    String(&'a mut String),
    /// Field whose type implements [`FlagValue`].
    Custom(&'a mut dyn FlagValue),
    /// Field whose type is neither a supported primitive nor a
    /// [`FlagValue`].
    Unsupported {
        /// Declared type of the field.
        type_name: &'static str,
    },
}

impl Target<'_> {
    /// Kind of the referenced field, or `None` when unsupported.
    #[must_use]
    pub const fn kind(&self) -> Option<Kind> {
        match self {
            Self::Bool(_) => Some(Kind::Bool),
            Self::Int(_) => Some(Kind::Int),
            Self::Int64(_) => Some(Kind::Int64),
            Self::Uint(_) => Some(Kind::Uint),
            Self::Uint64(_) => Some(Kind::Uint64),
            Self::Float64(_) => Some(Kind::Float64),
            Self::Duration(_) => Some(Kind::Duration),
            Self::String(_) => Some(Kind::String),
            Self::Custom(_) => Some(Kind::Custom),
            Self::Unsupported { .. } => None,
        }
    }

    /// Renders the field's current value as text.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Bool(v) => v.to_string(),
            Self::Int(v) => v.to_string(),
            Self::Int64(v) => v.to_string(),
            Self::Uint(v) => v.to_string(),
            Self::Uint64(v) => v.to_string(),
            Self::Float64(v) => v.to_string(),
            Self::Duration(v) => render_duration(**v),
            Self::String(v) => (**v).clone(),
            Self::Custom(v) => v.render(),
            Self::Unsupported { .. } => String::new(),
        }
    }

    /// Coerces `text` into the field's kind and overwrites the field.
    ///
    /// The field is left untouched when coercion fails.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] describing why `text` was rejected.
    pub fn set(&mut self, text: &str) -> Result<(), ValueError> {
        match self {
            Self::Bool(v) => **v = parse_bool(text)?,
            Self::Int(v) => **v = parse_signed(text, Kind::Int)?,
            Self::Int64(v) => **v = parse_signed(text, Kind::Int64)?,
            Self::Uint(v) => **v = parse_unsigned(text, Kind::Uint)?,
            Self::Uint64(v) => **v = parse_unsigned(text, Kind::Uint64)?,
            Self::Float64(v) => **v = parse_float(text)?,
            Self::Duration(v) => **v = parse_duration(text)?,
            Self::String(v) => text.clone_into(v),
            Self::Custom(v) => v.set(text).map_err(ValueError::Custom)?,
            Self::Unsupported { type_name } => {
                return Err(ValueError::Unsupported {
                    type_name: *type_name,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported { type_name } => f
                .debug_struct("Unsupported")
                .field("type_name", type_name)
                .finish(),
            other => f
                .debug_tuple(other.kind().map_or("Target", Kind::name))
                .field(&other.render())
                .finish(),
        }
    }
}

/// Built-in field types with a dedicated [`Target`] variant.
///
/// Sealed: the set of primitive kinds is fixed. Other types participate by
/// implementing [`FlagValue`].
pub trait Primitive: sealed::Sealed {
    /// Wraps a mutable reference in the matching [`Target`] variant.
    fn target(value: &mut Self) -> Target<'_>;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Primitive for $ty {
                fn target(value: &mut Self) -> Target<'_> {
                    Target::$variant(value)
                }
            }

            impl<'a> From<&'a mut $ty> for Target<'a> {
                fn from(value: &'a mut $ty) -> Self {
                    Target::$variant(value)
                }
            }
        )*
    };
}

primitive! {
    bool => Bool,
    i32 => Int,
    i64 => Int64,
    u32 => Uint,
    u64 => Uint64,
    f64 => Float64,
    Duration => Duration,
    String => String,
}

/// Support for `#[derive(FlagStruct)]`. Not public API.
///
/// The derive wraps each field in a [`Probe`] and calls `flag_target` on
/// `&&Probe`. Method resolution then picks the first applicable impl:
/// [`ViaPrimitive`] (receiver `&&Probe`), [`ViaFlagValue`] (one autoref
/// further), and finally [`ViaUnsupported`] (after one deref). This selects
/// the target kind from the field's concrete type without requiring every
/// field type to implement a common trait.
#[doc(hidden)]
pub mod __private {
    use std::any::type_name;
    use std::cell::Cell;

    use super::{Primitive, Target};
    use crate::value::FlagValue;

    /// Traits the generated code brings into scope.
    pub mod via {
        pub use super::{ViaFlagValue, ViaPrimitive, ViaUnsupported};
    }

    /// One-shot holder for a field reference during target selection.
    pub struct Probe<'a, T>(Cell<Option<&'a mut T>>);

    impl<'a, T> Probe<'a, T> {
        /// Wraps `value` for target selection.
        pub const fn new(value: &'a mut T) -> Self {
            Self(Cell::new(Some(value)))
        }

        fn take(&self) -> Option<&'a mut T> {
            self.0.take()
        }

        fn unsupported() -> Target<'a> {
            Target::Unsupported {
                type_name: type_name::<T>(),
            }
        }
    }

    /// Selected for supported primitive fields.
    pub trait ViaPrimitive<'a> {
        /// Builds the field's target.
        fn flag_target(&self) -> Target<'a>;
    }

    impl<'a, T: Primitive> ViaPrimitive<'a> for &Probe<'a, T> {
        fn flag_target(&self) -> Target<'a> {
            self.take()
                .map_or_else(Probe::<T>::unsupported, |value| T::target(value))
        }
    }

    /// Selected for fields implementing [`FlagValue`].
    pub trait ViaFlagValue<'a> {
        /// Builds the field's target.
        fn flag_target(&self) -> Target<'a>;
    }

    impl<'a, T: FlagValue + 'a> ViaFlagValue<'a> for &&Probe<'a, T> {
        fn flag_target(&self) -> Target<'a> {
            self.take()
                .map_or_else(Probe::<T>::unsupported, |value| Target::Custom(value))
        }
    }

    /// Fallback for every other field type.
    pub trait ViaUnsupported<'a> {
        /// Builds the field's target.
        fn flag_target(&self) -> Target<'a>;
    }

    impl<'a, T> ViaUnsupported<'a> for Probe<'a, T> {
        fn flag_target(&self) -> Target<'a> {
            Self::unsupported()
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for target selection and coercion.

    use super::__private::Probe;
    use super::__private::via::*;
    use super::*;
    use crate::value::BoxError;
    use anyhow::Result;
    use rstest::rstest;

    #[derive(Debug, Default, PartialEq)]
    struct Level(u8);

    impl FlagValue for Level {
        fn render(&self) -> String {
            format!("L{}", self.0)
        }

        fn set(&mut self, text: &str) -> Result<(), BoxError> {
            let digits = text.strip_prefix('L').unwrap_or(text);
            self.0 = digits.parse()?;
            Ok(())
        }
    }

    #[rstest]
    fn probe_prefers_primitives() {
        let mut count = 3_i32;
        let target = (&&Probe::new(&mut count)).flag_target();
        assert_eq!(target.kind(), Some(Kind::Int));
    }

    #[rstest]
    fn probe_selects_flag_value_impls() {
        let mut level = Level(2);
        let target = (&&Probe::new(&mut level)).flag_target();
        assert_eq!(target.kind(), Some(Kind::Custom));
        assert_eq!(target.render(), "L2");
    }

    #[rstest]
    fn probe_falls_back_to_unsupported() {
        let mut bytes = vec![1_u8];
        let target = (&&Probe::new(&mut bytes)).flag_target();
        assert!(matches!(
            target,
            Target::Unsupported { type_name } if type_name.contains("Vec<u8>")
        ));
    }

    #[rstest]
    fn set_overwrites_in_place() -> Result<()> {
        let mut count = 17_i32;
        let mut name = String::from("old");
        let mut level = Level(0);
        Target::from(&mut count).set("42")?;
        Target::from(&mut name).set("new")?;
        Target::Custom(&mut level).set("L4")?;
        assert_eq!(count, 42);
        assert_eq!(name, "new");
        assert_eq!(level, Level(4));
        Ok(())
    }

    #[rstest]
    fn failed_set_leaves_value_untouched() {
        let mut count = 17_i32;
        let mut target = Target::from(&mut count);
        assert!(target.set("abc").is_err());
        assert_eq!(target.render(), "17");
    }

    #[rstest]
    fn custom_errors_are_wrapped() {
        let mut level = Level(1);
        let mut target = Target::Custom(&mut level);
        assert!(matches!(target.set("Lx"), Err(ValueError::Custom(_))));
    }

    #[rstest]
    fn unsupported_targets_reject_values() {
        let mut target = Target::Unsupported { type_name: "char" };
        assert!(matches!(
            target.set("x"),
            Err(ValueError::Unsupported { type_name: "char" })
        ));
        assert_eq!(target.kind(), None);
    }

    #[rstest]
    #[case::duration(Duration::from_secs(90), "1m 30s")]
    #[case::zero(Duration::ZERO, "0s")]
    fn renders_durations(#[case] value: Duration, #[case] expected: &str) {
        let mut value = value;
        assert_eq!(Target::from(&mut value).render(), expected);
    }
}
