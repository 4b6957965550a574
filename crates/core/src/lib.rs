//! Core types and traits for FacetDB
//!
//! This crate defines the foundational pieces shared by the index crates:
//! - FacetSyntax: separator-based facet path parsing and validation
//! - Error: error type hierarchy
//! - FacetConfig: `facets.toml` configuration
//! - DocId / DocSet / FacetCountMap: identifier and set types
//! - Traits: `CatalogIndex` (generic index contract) and `FacetCounts`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod path;
pub mod traits;
pub mod types;

pub use config::{FacetConfig, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use path::{FacetSyntax, PathError};
pub use traits::{CatalogIndex, FacetCounts};
pub use types::{DocId, DocSet, FacetCountMap};
