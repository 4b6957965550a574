//! Shared, lock-guarded facet index
//!
//! A single index or unindex touches many posting sets. Readers must never
//! observe one half-applied (a document matching `price` but not yet
//! `price:0-100`), so every write holds the write lock for the whole
//! operation and every read holds the read lock.

use crate::index::FacetIndex;
use facetdb_core::{DocId, DocSet, FacetCountMap, Result};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Cloneable handle to a facet index behind a reader-writer lock
#[derive(Debug, Clone)]
pub struct SharedFacetIndex {
    inner: Arc<RwLock<FacetIndex>>,
}

impl SharedFacetIndex {
    /// Wrap an index
    pub fn new(index: FacetIndex) -> Self {
        SharedFacetIndex {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// Index `docid` under the given leaf terms
    pub fn index_doc<I>(&self, docid: DocId, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.inner.write().index_doc(docid, values)
    }

    /// Remove `docid`. Returns false if it was not indexed.
    pub fn unindex_doc(&self, docid: DocId) -> bool {
        self.inner.write().unindex_doc(docid)
    }

    /// Documents matching every term in `query`
    pub fn search(&self, query: &[&str]) -> DocSet {
        self.inner.read().search(query)
    }

    /// Drill-down counts for `result` under `query`
    pub fn counts(&self, result: &DocSet, query: &[&str]) -> FacetCountMap {
        self.inner.read().counts(result, query)
    }

    /// Search and count against the same state
    pub fn search_with_counts(&self, query: &[&str]) -> (DocSet, FacetCountMap) {
        self.inner.read().search_with_counts(query)
    }

    /// Hold the read lock for several queries
    pub fn read(&self) -> RwLockReadGuard<'_, FacetIndex> {
        self.inner.read()
    }

    /// Hold the write lock for several updates
    pub fn write(&self) -> RwLockWriteGuard<'_, FacetIndex> {
        self.inner.write()
    }
}

impl From<FacetIndex> for SharedFacetIndex {
    fn from(index: FacetIndex) -> Self {
        Self::new(index)
    }
}
