//! Shared identifier and set types

use roaring::RoaringBitmap;
use std::collections::BTreeMap;

/// Opaque document identifier assigned by the host catalog
pub type DocId = u32;

/// Set of document ids
///
/// Compressed bitmap so that intersections (search) and counted
/// intersections (drill-down counts) stay cheap on large catalogs.
pub type DocSet = RoaringBitmap;

/// Facet path -> number of documents, as returned by drill-down counting
pub type FacetCountMap = BTreeMap<String, u64>;
