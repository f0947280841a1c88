//! Error types produced by flag registration and parsing.

mod helpers;
mod types;

pub use helpers::is_display_request;
pub use types::{FlagStructError, FlagStructResult};

#[cfg(test)]
mod tests;
