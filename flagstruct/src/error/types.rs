//! Primary error enum for flag registration.

use thiserror::Error;

use crate::flag_set::FlagSetError;
use crate::value::ValueError;

/// Errors that can occur while registering or parsing flags.
///
/// Registration errors are configuration mistakes: callers are expected to
/// report them and abort startup rather than recover.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagStructError {
    /// The value handed to the scanner is not a struct.
    #[error("cannot register flags on {type_name}: value is not a record")]
    NotARecord {
        /// Type of the value.
        type_name: &'static str,
    },

    /// The record has no `pub` fields carrying a `#[flag]` declaration.
    #[error("{type_name} contains no flaggable fields")]
    NoFlaggableFields {
        /// Type of the record.
        type_name: &'static str,
    },

    /// A `#[flag_default]` could not be coerced into the field's kind.
    #[error("invalid default {text:?} for flag {name:?}: {source}")]
    DefaultParse {
        /// Declared flag name, without prefix.
        name: String,
        /// Offending default text.
        text: String,
        /// Why the text was rejected.
        #[source]
        source: ValueError,
    },

    /// A flagged field has a type that is neither a supported primitive nor
    /// a `FlagValue`.
    #[error("field {field} of type {type_name} does not implement FlagValue")]
    UnsupportedType {
        /// Field identifier.
        field: &'static str,
        /// Declared type of the field.
        type_name: &'static str,
    },

    /// The flag set rejected a declaration.
    #[error(transparent)]
    FlagSet(#[from] FlagSetError),

    /// Error parsing command-line arguments.
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// A parsed argument could not be read back from clap's matches.
    #[error("failed to read parsed argument: {0}")]
    Matches(#[from] clap::parser::MatchesError),

    /// A command-line value could not be coerced into its flag's kind.
    #[error("invalid value {text:?} for flag --{name}: {source}")]
    InvalidValue {
        /// Flag name as registered.
        name: String,
        /// Offending text.
        text: String,
        /// Why the text was rejected.
        #[source]
        source: ValueError,
    },
}

impl From<clap::Error> for FlagStructError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(e.into())
    }
}

/// Result alias used throughout the crate.
pub type FlagStructResult<T> = Result<T, FlagStructError>;
