//! Test helpers shared across crates.
//!
//! [`RecordingFlags`] is an in-memory [`FlagSet`] that remembers every
//! declaration so tests can inspect names, help text, kinds, and initial
//! values, then drive values into the bound fields without a command line.

use std::time::Duration;

use flagstruct::value::render_duration;
use flagstruct::{FlagSet, FlagSetError, FlagValue, Kind, Target, ValueError};
use thiserror::Error;

/// One recorded declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declared {
    /// Name as passed to the flag set, prefix included.
    pub name: String,
    /// Help text.
    pub help: String,
    /// Kind implied by the `declare_*` method that was called.
    pub kind: Kind,
    /// Initial value rendered as text.
    pub initial: String,
}

/// A [`FlagSet`] that records declarations and keeps the bound targets.
///
/// # Examples
///
/// ```
/// use flagstruct::FlagSet;
/// use flagstruct_test_helpers::RecordingFlags;
///
/// let mut count = 1_i32;
/// let mut flags = RecordingFlags::new();
/// flags.declare_int(&mut count, "count", 1, "How many")?;
/// flags.set("count", "5")?;
/// drop(flags);
/// assert_eq!(count, 5);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct RecordingFlags<'a> {
    declared: Vec<(Declared, Target<'a>)>,
}

impl<'a> RecordingFlags<'a> {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declarations in the order they were made.
    pub fn declarations(&self) -> impl Iterator<Item = &Declared> {
        self.declared.iter().map(|(declared, _)| declared)
    }

    /// Names in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.declarations().map(|d| d.name.as_str()).collect()
    }

    /// Finds a declaration by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Declared> {
        self.declarations().find(|d| d.name == name)
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declared.len()
    }

    /// Whether nothing has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }

    /// Stores `text` into the field bound to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Unknown`] when no flag is called `name`, or
    /// [`SetError::Value`] when the text does not parse.
    pub fn set(&mut self, name: &str, text: &str) -> Result<(), SetError> {
        let target = self
            .declared
            .iter_mut()
            .find_map(|(declared, target)| (declared.name == name).then_some(target))
            .ok_or_else(|| SetError::Unknown(name.to_owned()))?;
        target.set(text).map_err(SetError::Value)
    }

    /// Current value of the field bound to `name`, rendered as text.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<String> {
        self.declared
            .iter()
            .find(|(declared, _)| declared.name == name)
            .map(|(_, target)| target.render())
    }

    fn record(
        &mut self,
        target: Target<'a>,
        kind: Kind,
        name: &str,
        initial: String,
        help: &str,
    ) -> Result<(), FlagSetError> {
        if self.lookup(name).is_some() {
            return Err(FlagSetError::DuplicateName {
                name: name.to_owned(),
            });
        }
        let declared = Declared {
            name: name.to_owned(),
            help: help.to_owned(),
            kind,
            initial,
        };
        self.declared.push((declared, target));
        Ok(())
    }
}

/// Failure to drive a value into a recorded flag.
#[derive(Debug, Error)]
pub enum SetError {
    /// No flag has the requested name.
    #[error("no flag named {0}")]
    Unknown(String),
    /// The text did not parse as the flag's kind.
    #[error(transparent)]
    Value(ValueError),
}

impl<'a> FlagSet<'a> for RecordingFlags<'a> {
    fn declare_bool(
        &mut self,
        target: &'a mut bool,
        name: &str,
        initial: bool,
        help: &str,
    ) -> Result<(), FlagSetError> {
        self.record(Target::Bool(target), Kind::Bool, name, initial.to_string(), help)
    }

    fn declare_int(
        &mut self,
        target: &'a mut i32,
        name: &str,
        initial: i32,
        help: &str,
    ) -> Result<(), FlagSetError> {
        self.record(Target::Int(target), Kind::Int, name, initial.to_string(), help)
    }

    fn declare_int64(
        &mut self,
        target: &'a mut i64,
        name: &str,
        initial: i64,
        help: &str,
    ) -> Result<(), FlagSetError> {
        self.record(Target::Int64(target), Kind::Int64, name, initial.to_string(), help)
    }

    fn declare_uint(
        &mut self,
        target: &'a mut u32,
        name: &str,
        initial: u32,
        help: &str,
    ) -> Result<(), FlagSetError> {
        self.record(Target::Uint(target), Kind::Uint, name, initial.to_string(), help)
    }

    fn declare_uint64(
        &mut self,
        target: &'a mut u64,
        name: &str,
        initial: u64,
        help: &str,
    ) -> Result<(), FlagSetError> {
        self.record(Target::Uint64(target), Kind::Uint64, name, initial.to_string(), help)
    }

    fn declare_float64(
        &mut self,
        target: &'a mut f64,
        name: &str,
        initial: f64,
        help: &str,
    ) -> Result<(), FlagSetError> {
        self.record(Target::Float64(target), Kind::Float64, name, initial.to_string(), help)
    }

    fn declare_duration(
        &mut self,
        target: &'a mut Duration,
        name: &str,
        initial: Duration,
        help: &str,
    ) -> Result<(), FlagSetError> {
        self.record(
            Target::Duration(target),
            Kind::Duration,
            name,
            render_duration(initial),
            help,
        )
    }

    fn declare_string(
        &mut self,
        target: &'a mut String,
        name: &str,
        initial: &str,
        help: &str,
    ) -> Result<(), FlagSetError> {
        self.record(Target::String(target), Kind::String, name, initial.to_owned(), help)
    }

    fn declare_custom(
        &mut self,
        target: &'a mut dyn FlagValue,
        name: &str,
        help: &str,
    ) -> Result<(), FlagSetError> {
        let initial = target.render();
        self.record(Target::Custom(target), Kind::Custom, name, initial, help)
    }
}
