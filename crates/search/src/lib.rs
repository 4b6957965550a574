//! Hierarchical facet index
//!
//! This crate provides:
//! - HierarchyRegistry: the declared facet tree
//! - ForwardStore / InvertedStore: docid -> leaf terms and term -> docids
//! - QueryEngine: conjunctive search and drill-down counts
//! - FacetIndex: the composed index
//! - CatalogFacetIndex: adapter to the generic `CatalogIndex` contract
//! - SharedFacetIndex: lock-guarded handle for concurrent hosts
//! - Snapshot encode/decode for the host's storage layer
//!
//! # Usage
//!
//! ```
//! use facetdb_search::FacetIndex;
//!
//! let mut index = FacetIndex::with_facets(["color", "color:red", "color:blue"])?;
//! index.index_doc(1, ["color:red"])?;
//! index.index_doc(2, ["color:red", "color:blue"])?;
//!
//! let (result, counts) = index.search_with_counts(&["color:red"]);
//! assert_eq!(result.len(), 2);
//! assert_eq!(counts["color:blue"], 1);
//! # Ok::<(), facetdb_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod forward;
pub mod hierarchy;
pub mod index;
pub mod inverted;
pub mod query;
pub mod shared;
pub mod snapshot;

// Re-export commonly used types
pub use catalog::{CatalogFacetIndex, Discriminator};
pub use forward::ForwardStore;
pub use hierarchy::HierarchyRegistry;
pub use index::FacetIndex;
pub use inverted::InvertedStore;
pub use query::QueryEngine;
pub use shared::SharedFacetIndex;
pub use snapshot::{decode_snapshot, encode_snapshot, load_snapshot, write_snapshot};
