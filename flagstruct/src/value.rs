//! Text coercion for flag values.
//!
//! The same rules apply to `#[flag_default]` text and to values supplied on
//! the command line, so a default behaves exactly as if the user had typed
//! it.

use std::fmt;
use std::num::{IntErrorKind, ParseFloatError, ParseIntError};
use std::time::Duration;

use thiserror::Error;

/// Boxed error returned by [`FlagValue::set`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Capability implemented by custom field types that can be set from text.
///
/// Fields of any type implementing `FlagValue` can carry a `#[flag]`
/// declaration alongside the built-in kinds.
///
/// # Examples
///
/// ```
/// use flagstruct::{BoxError, FlagValue};
///
/// struct Level(u8);
///
/// impl FlagValue for Level {
///     fn render(&self) -> String {
///         self.0.to_string()
///     }
///
///     fn set(&mut self, text: &str) -> Result<(), BoxError> {
///         let level: u8 = text.parse()?;
///         if level > 5 {
///             return Err("level must be at most 5".into());
///         }
///         self.0 = level;
///         Ok(())
///     }
/// }
/// ```
pub trait FlagValue {
    /// Renders the current value as text.
    fn render(&self) -> String;

    /// Parses `text` and stores the result.
    ///
    /// # Errors
    ///
    /// Returns an error when `text` is malformed; the value should be left
    /// unchanged in that case.
    fn set(&mut self, text: &str) -> Result<(), BoxError>;
}

/// Primitive category of a flaggable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `bool`
    Bool,
    /// `i32`
    Int,
    /// `i64`
    Int64,
    /// `u32`
    Uint,
    /// `u64`
    Uint64,
    /// `f64`
    Float64,
    /// `std::time::Duration`
    Duration,
    /// `String`
    String,
    /// A type implementing [`FlagValue`].
    Custom,
}

impl Kind {
    /// Short name used in help output and diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint64 => "uint64",
            Self::Float64 => "float64",
            Self::Duration => "duration",
            Self::String => "string",
            Self::Custom => "value",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reasons text could not be coerced into a field's kind.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValueError {
    /// The text is not valid syntax for the kind.
    #[error("invalid {kind} syntax")]
    Syntax {
        /// Kind the text was parsed as.
        kind: Kind,
    },

    /// Integer text the standard parser rejected.
    #[error("invalid integer: {0}")]
    Int(#[from] ParseIntError),

    /// The number does not fit the field's type.
    #[error("value out of range for {kind}")]
    OutOfRange {
        /// Kind the text was parsed as.
        kind: Kind,
    },

    /// Floating point text the standard parser rejected.
    #[error("invalid float: {0}")]
    Float(#[from] ParseFloatError),

    /// Duration text `humantime` rejected.
    #[error("invalid duration: {0}")]
    Duration(#[from] humantime::DurationError),

    /// Error reported by a [`FlagValue`] implementation.
    #[error("{0}")]
    Custom(BoxError),

    /// The target type cannot hold a flag value at all.
    #[error("type {type_name} cannot hold a flag value")]
    Unsupported {
        /// Declared type of the field.
        type_name: &'static str,
    },
}

/// Parses a boolean in any of the spellings `1 t T TRUE true True` or
/// `0 f F FALSE false False`.
///
/// # Errors
///
/// Returns [`ValueError::Syntax`] for any other text.
pub fn parse_bool(text: &str) -> Result<bool, ValueError> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ValueError::Syntax { kind: Kind::Bool }),
    }
}

/// Splits a radix prefix off unsigned integer text.
///
/// Returns the radix, the remaining digits, and whether a prefix was present.
fn split_radix(text: &str) -> (u32, &str, bool) {
    let prefixes = [
        ("0x", 16),
        ("0X", 16),
        ("0o", 8),
        ("0O", 8),
        ("0b", 2),
        ("0B", 2),
    ];
    for (prefix, radix) in prefixes {
        if let Some(rest) = text.strip_prefix(prefix) {
            return (radix, rest, true);
        }
    }
    match text.strip_prefix('0') {
        Some(rest) if !rest.is_empty() => (8, rest, true),
        _ => (10, text, false),
    }
}

/// Underscores may only separate digits, or directly follow a radix prefix.
fn underscores_ok(digits: &str, prefixed: bool) -> bool {
    let digits = if prefixed {
        digits.strip_prefix('_').unwrap_or(digits)
    } else {
        digits
    };
    !digits.starts_with('_') && !digits.ends_with('_') && !digits.contains("__")
}

fn parse_magnitude(text: &str, kind: Kind) -> Result<u64, ValueError> {
    if text.starts_with(['+', '-']) {
        return Err(ValueError::Syntax { kind });
    }
    let (radix, digits, prefixed) = split_radix(text);
    if !underscores_ok(digits, prefixed) {
        return Err(ValueError::Syntax { kind });
    }
    let cleaned = digits.replace('_', "");
    u64::from_str_radix(&cleaned, radix).map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow => ValueError::OutOfRange { kind },
        _ => ValueError::Int(err),
    })
}

/// Parses signed integer text with an optional sign and radix prefix
/// (`0x`, `0o`, `0b`, or a leading `0` for octal).
///
/// # Errors
///
/// Returns [`ValueError::OutOfRange`] when the value does not fit `T`, and a
/// syntax error for malformed text.
///
/// # Examples
///
/// ```
/// use flagstruct::value::{Kind, parse_signed};
///
/// assert_eq!(parse_signed::<i64>("-0x10", Kind::Int64).ok(), Some(-16));
/// assert_eq!(parse_signed::<i32>("1_000", Kind::Int).ok(), Some(1000));
/// assert!(parse_signed::<i32>("abc", Kind::Int).is_err());
/// ```
pub fn parse_signed<T>(text: &str, kind: Kind) -> Result<T, ValueError>
where
    T: TryFrom<i128>,
{
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let magnitude = i128::from(parse_magnitude(rest, kind)?);
    let value = if negative { -magnitude } else { magnitude };
    T::try_from(value).map_err(|_| ValueError::OutOfRange { kind })
}

/// Parses unsigned integer text with an optional radix prefix. Signs are
/// rejected.
///
/// # Errors
///
/// Returns [`ValueError::OutOfRange`] when the value does not fit `T`, and a
/// syntax error for malformed text.
pub fn parse_unsigned<T>(text: &str, kind: Kind) -> Result<T, ValueError>
where
    T: TryFrom<u64>,
{
    let value = parse_magnitude(text, kind)?;
    T::try_from(value).map_err(|_| ValueError::OutOfRange { kind })
}

/// Parses floating point text using Rust's `f64` grammar.
///
/// # Errors
///
/// Returns [`ValueError::Float`] for malformed text.
pub fn parse_float(text: &str) -> Result<f64, ValueError> {
    Ok(text.parse::<f64>()?)
}

/// Parses a duration such as `1h30m`, `250ms`, or `0`.
///
/// Fractional amounts such as `1.5h` are accepted. An amount needs a digit
/// before its decimal point, so `.5s` is rejected and has to be written as
/// `0.5s`.
///
/// # Errors
///
/// Returns [`ValueError::Duration`] for text `humantime` rejects.
pub fn parse_duration(text: &str) -> Result<Duration, ValueError> {
    if text == "0" {
        return Ok(Duration::ZERO);
    }
    Ok(humantime::parse_duration(text)?)
}

/// Renders a duration in the syntax [`parse_duration`] accepts.
#[must_use]
pub fn render_duration(duration: Duration) -> String {
    humantime::format_duration(duration).to_string()
}
