//! Helpers for classifying external errors.

use clap::{Error as ClapError, error::ErrorKind};

use super::FlagStructError;

/// Returns `true` when a [`clap::Error`] corresponds to `--help` or
/// `--version`.
///
/// Clap surfaces these requests as errors so entry points can delegate to
/// [`clap::Error::exit`] and keep the expected zero exit status.
#[must_use]
pub fn is_display_request(err: &ClapError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

impl FlagStructError {
    /// Returns the underlying clap error when this is a `--help` or
    /// `--version` request.
    #[must_use]
    pub fn as_display_request(&self) -> Option<&ClapError> {
        match self {
            Self::CliParsing(err) if is_display_request(err) => Some(err),
            _ => None,
        }
    }
}
