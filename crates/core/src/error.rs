//! Error types for the facet index
//!
//! The taxonomy is narrow: queries never fail, unindexing an absent document
//! is a no-op, and only malformed input, configuration and persistence can
//! produce an error. We use `thiserror` for `Display` and `Error` impls.

use crate::path::PathError;
use std::io;
use thiserror::Error;

/// Result type alias for facet index operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the facet index
#[derive(Debug, Error)]
pub enum Error {
    /// A facet path failed syntax validation
    #[error("Invalid facet path '{path}': {source}")]
    InvalidPath {
        /// The rejected path
        path: String,
        /// Why it was rejected
        #[source]
        source: PathError,
    },

    /// Leaf term not declared in the hierarchy (strict mode)
    #[error("Unknown facet: {0}")]
    UnknownFacet(String),

    /// A declared facet whose ancestor is not declared
    #[error("Facet '{path}' declared without its ancestor '{missing}'")]
    IncompleteHierarchy {
        /// The declared facet
        path: String,
        /// The first undeclared ancestor
        missing: String,
    },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Persisted or in-memory state is inconsistent
    #[error("Data corruption: {0}")]
    Corruption(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Wrap a path error together with the offending path
    pub fn invalid_path(path: impl Into<String>, source: PathError) -> Self {
        Error::InvalidPath {
            path: path.into(),
            source,
        }
    }
}

impl From<rmp_serde::encode::Error> for Error {
    fn from(e: rmp_serde::encode::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<rmp_serde::decode::Error> for Error {
    fn from(e: rmp_serde::decode::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
