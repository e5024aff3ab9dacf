//! Error types for treedex-core.

use thiserror::Error;

/// Errors surfaced by trees, field indexes and configuration loading.
///
/// Record lookups that come back empty are not errors: identifiers that no
/// longer resolve are filtered out of search and rebuild results.
#[derive(Error, Debug)]
pub enum Error {
    /// Field name is not one of the projectable record fields.
    #[error("Unsupported field: {0}")]
    InvalidField(String),

    /// Tree tag is neither `bst` nor `avl`.
    #[error("Unsupported tree variant: {0}")]
    InvalidVariant(String),

    /// No index has been created for the field.
    #[error("No index for field: {0}")]
    IndexNotFound(String),

    /// Configuration could not be extracted or failed validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error while writing an index file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for treedex operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}
