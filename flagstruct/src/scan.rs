//! Field scanning: turns a record's reflection table into flag descriptors.

use std::fmt;

use tracing::trace;

use crate::error::{FlagStructError, FlagStructResult};
use crate::reflect::{FieldSpec, Reflect, Shape};
use crate::target::Target;
use crate::value::Kind;

/// Separates the flag name from its help text in a `#[flag]` declaration.
pub const HELP_SEPARATOR: char = ',';

/// Registration parameters for one flaggable field.
///
/// A descriptor borrows its field through [`Target`], so it cannot outlive
/// the record it was scanned from.
#[derive(Debug)]
pub struct FieldDescriptor<'a> {
    field: &'static str,
    type_name: &'static str,
    name: String,
    help: String,
    default_text: Option<String>,
    target: Target<'a>,
}

impl<'a> FieldDescriptor<'a> {
    /// Builds a descriptor from a `"<name>[,<help>]"` declaration.
    ///
    /// Without a separator the whole declaration is used as both the name
    /// and the help text.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagstruct::{FieldDescriptor, Target};
    ///
    /// let mut count = 0_i32;
    /// let descriptor =
    ///     FieldDescriptor::new("count,How many", None, Target::Int(&mut count));
    /// assert_eq!(descriptor.name(), "count");
    /// assert_eq!(descriptor.help(), "How many");
    /// ```
    #[must_use]
    pub fn new(declaration: &str, default_text: Option<&str>, target: Target<'a>) -> Self {
        let (name, help) = split_declaration(declaration);
        Self {
            field: "",
            type_name: "",
            name: name.to_owned(),
            help: help.to_owned(),
            default_text: default_text.map(ToOwned::to_owned),
            target,
        }
    }

    /// Records the field identifier and declared type for diagnostics.
    #[must_use]
    pub const fn with_field(mut self, field: &'static str, type_name: &'static str) -> Self {
        self.field = field;
        self.type_name = type_name;
        self
    }

    /// Flag name before any prefix is applied.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Help text shown for the flag.
    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Literal default text, if one was declared.
    #[must_use]
    pub fn default_text(&self) -> Option<&str> {
        self.default_text.as_deref()
    }

    /// Field identifier the descriptor was scanned from.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Declared type of the field.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Kind of the field, or `None` when its type is unsupported.
    #[must_use]
    pub const fn kind(&self) -> Option<Kind> {
        self.target.kind()
    }

    /// Typed reference to the field.
    #[must_use]
    pub const fn target(&self) -> &Target<'a> {
        &self.target
    }

    pub(crate) fn into_parts(self) -> (String, String, Option<String>, Target<'a>) {
        (self.name, self.help, self.default_text, self.target)
    }
}

impl fmt::Display for FieldDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<flag {:?} help={:?}>", self.name, self.help)
    }
}

/// Splits a declaration at the first [`HELP_SEPARATOR`].
///
/// # Examples
///
/// ```
/// use flagstruct::split_declaration;
///
/// assert_eq!(split_declaration("x,some help"), ("x", "some help"));
/// assert_eq!(split_declaration("x"), ("x", "x"));
/// ```
#[must_use]
pub fn split_declaration(declaration: &str) -> (&str, &str) {
    declaration
        .split_once(HELP_SEPARATOR)
        .unwrap_or((declaration, declaration))
}

/// Converts one reflected field into a descriptor, or `None` when the field
/// is not flaggable.
fn descriptor_for(spec: FieldSpec<'_>) -> Option<FieldDescriptor<'_>> {
    let FieldSpec {
        ident,
        type_name,
        exported,
        flag,
        default,
        target,
    } = spec;
    let Some(declaration) = flag.filter(|d| !d.is_empty()) else {
        trace!(field = ident, "skipping field without flag declaration");
        return None;
    };
    if !exported {
        trace!(field = ident, "skipping unexported field");
        return None;
    }
    let default_text = default.filter(|d| !d.is_empty());
    Some(FieldDescriptor::new(declaration, default_text, target).with_field(ident, type_name))
}

/// Scans `record` and returns one descriptor per flaggable field, in
/// declaration order.
///
/// A field is flaggable when it is `pub` and carries a non-empty `#[flag]`
/// declaration; other fields are skipped silently. An empty result is not an
/// error here; [`register`](crate::register) treats it as one.
///
/// # Errors
///
/// Returns [`FlagStructError::NotARecord`] when `record` is not a struct.
pub fn scan<T>(record: &mut T) -> FlagStructResult<Vec<FieldDescriptor<'_>>>
where
    T: Reflect + ?Sized,
{
    match record.reflect_mut() {
        Shape::Record { fields, .. } => Ok(fields.into_iter().filter_map(descriptor_for).collect()),
        Shape::Scalar { type_name } => Err(FlagStructError::NotARecord { type_name }),
    }
}
