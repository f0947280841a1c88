//! The flag-set capability flags are registered into.

use std::time::Duration;

use thiserror::Error;

use crate::value::FlagValue;

/// Reasons a flag set refuses a declaration.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlagSetError {
    /// A flag with this name is already declared in the set.
    #[error("flag redefined: {name}")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// The name cannot be used as a flag.
    #[error("invalid flag name {name:?}")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
}

/// A collection of flags that binds each flag to a mutable target.
///
/// Every `declare_*` method takes the target for `'a`; the set writes parsed
/// values through it later. `initial` is the value shown as the flag's
/// default; it equals the target's value at declaration time.
///
/// Implementations own flag naming: they must reject a name already
/// declared with [`FlagSetError::DuplicateName`].
pub trait FlagSet<'a> {
    /// Declares a `bool` flag.
    ///
    /// # Errors
    ///
    /// Returns a [`FlagSetError`] when the name is rejected.
    fn declare_bool(
        &mut self,
        target: &'a mut bool,
        name: &str,
        initial: bool,
        help: &str,
    ) -> Result<(), FlagSetError>;

    /// Declares an `i32` flag.
    ///
    /// # Errors
    ///
    /// Returns a [`FlagSetError`] when the name is rejected.
    fn declare_int(
        &mut self,
        target: &'a mut i32,
        name: &str,
        initial: i32,
        help: &str,
    ) -> Result<(), FlagSetError>;

    /// Declares an `i64` flag.
    ///
    /// # Errors
    ///
    /// Returns a [`FlagSetError`] when the name is rejected.
    fn declare_int64(
        &mut self,
        target: &'a mut i64,
        name: &str,
        initial: i64,
        help: &str,
    ) -> Result<(), FlagSetError>;

    /// Declares a `u32` flag.
    ///
    /// # Errors
    ///
    /// Returns a [`FlagSetError`] when the name is rejected.
    fn declare_uint(
        &mut self,
        target: &'a mut u32,
        name: &str,
        initial: u32,
        help: &str,
    ) -> Result<(), FlagSetError>;

    /// Declares a `u64` flag.
    ///
    /// # Errors
    ///
    /// Returns a [`FlagSetError`] when the name is rejected.
    fn declare_uint64(
        &mut self,
        target: &'a mut u64,
        name: &str,
        initial: u64,
        help: &str,
    ) -> Result<(), FlagSetError>;

    /// Declares an `f64` flag.
    ///
    /// # Errors
    ///
    /// Returns a [`FlagSetError`] when the name is rejected.
    fn declare_float64(
        &mut self,
        target: &'a mut f64,
        name: &str,
        initial: f64,
        help: &str,
    ) -> Result<(), FlagSetError>;

    /// Declares a `Duration` flag.
    ///
    /// # Errors
    ///
    /// Returns a [`FlagSetError`] when the name is rejected.
    fn declare_duration(
        &mut self,
        target: &'a mut Duration,
        name: &str,
        initial: Duration,
        help: &str,
    ) -> Result<(), FlagSetError>;

    /// Declares a `String` flag.
    ///
    /// # Errors
    ///
    /// Returns a [`FlagSetError`] when the name is rejected.
    fn declare_string(
        &mut self,
        target: &'a mut String,
        name: &str,
        initial: &str,
        help: &str,
    ) -> Result<(), FlagSetError>;

    /// Declares a flag backed by a custom [`FlagValue`]. Its initial value is
    /// whatever [`FlagValue::render`] reports.
    ///
    /// # Errors
    ///
    /// Returns a [`FlagSetError`] when the name is rejected.
    fn declare_custom(
        &mut self,
        target: &'a mut dyn FlagValue,
        name: &str,
        help: &str,
    ) -> Result<(), FlagSetError>;
}
