//! FacetDB - hierarchical faceted index for catalog drill-down search
//!
//! Documents are indexed under colon-structured facet paths such as
//! `style:gucci:handbag`. The index answers two queries:
//! - which documents match every facet in a filter list (a document matches
//!   a facet if it was indexed at that facet or anywhere below it)
//! - for a filtered result set, which further facets are available for
//!   drill-down and how many documents each would keep
//!
//! # Quick Start
//!
//! ```
//! use facetdb::{FacetConfig, FacetIndex};
//!
//! let config = FacetConfig::new(["price", "price:0-100", "color", "color:red"]);
//! let mut index = FacetIndex::new(&config)?;
//! index.index_doc(1, ["price:0-100", "color:red"])?;
//!
//! let result = index.search(&["price"]);
//! let counts = index.counts(&result, &["price"]);
//! assert_eq!(counts["color:red"], 1);
//! # Ok::<(), facetdb::Error>(())
//! ```
//!
//! # Architecture
//!
//! Path syntax, errors, configuration and the generic index traits live in
//! `facetdb-core`; the index itself lives in `facetdb-search`. This crate
//! re-exports both.

pub use facetdb_core::*;
pub use facetdb_search::*;
