//! Index capability traits
//!
//! `CatalogIndex` is the generic contract a host catalog drives every index
//! through. Facet drill-down counting is a capability beyond it and lives in
//! the separate `FacetCounts` extension trait.

use crate::error::Result;
use crate::types::{DocId, DocSet, FacetCountMap};

/// Generic catalog index over documents of type `D`
///
/// Implementations are not required to be internally synchronized; the
/// host serializes writers against readers.
pub trait CatalogIndex<D: ?Sized> {
    /// Index `doc` under `docid`, replacing any earlier entry for `docid`
    ///
    /// # Errors
    ///
    /// Returns an error if the extracted values are invalid. The index is
    /// left unchanged in that case.
    fn index_doc(&mut self, docid: DocId, doc: &D) -> Result<()>;

    /// Remove `docid`. Unknown ids are ignored.
    fn unindex_doc(&mut self, docid: DocId);

    /// Re-index `doc` under `docid`
    fn reindex_doc(&mut self, docid: DocId, doc: &D) -> Result<()> {
        self.index_doc(docid, doc)
    }

    /// Documents matching every term in `query`
    fn search(&self, query: &[&str]) -> DocSet;

    /// `search(query)` restricted to `within`
    fn apply_intersect(&self, query: &[&str], within: &DocSet) -> DocSet {
        let mut result = self.search(query);
        result &= within;
        result
    }

    /// Drop every document
    fn clear(&mut self);

    /// Number of indexed documents
    fn document_count(&self) -> u64;

    /// Every indexed document id
    fn docids(&self) -> DocSet;

    /// Documents seen by `index_doc` that yielded no values
    fn not_indexed(&self) -> DocSet;
}

/// Drill-down counting over a current result set
pub trait FacetCounts {
    /// For every known facet not implied by `query`, the number of documents
    /// in `result` that would remain if it were added as a filter. Facets
    /// with a zero count are omitted.
    fn counts(&self, result: &DocSet, query: &[&str]) -> FacetCountMap;
}
