//! Hierarchical facet index
//!
//! This module composes the stores into the index the host talks to:
//! - HierarchyRegistry: declared facets, candidate set for counts
//! - ForwardStore: docid -> leaf terms, for exact removal
//! - InvertedStore: term -> docids, at every depth
//! - QueryEngine: search and drill-down counts
//!
//! # Indexing
//!
//! A document indexed with leaf term `style:gucci:handbag` is posted under
//! `style`, `style:gucci` and `style:gucci:handbag`. Only the leaf terms are
//! kept in the forward store; the ancestors are re-derived on removal.
//! Indexing an id that is already present replaces it.
//!
//! # Thread Safety
//!
//! `FacetIndex` is not internally synchronized. One logical index/unindex
//! touches many posting sets and must appear atomic to readers; wrap it in
//! [`SharedFacetIndex`](crate::SharedFacetIndex) or an equivalent lock.

use crate::forward::ForwardStore;
use crate::hierarchy::HierarchyRegistry;
use crate::inverted::InvertedStore;
use crate::query::QueryEngine;
use facetdb_core::{
    DocId, DocSet, Error, FacetConfig, FacetCountMap, FacetCounts, FacetSyntax, Result,
};
use rustc_hash::FxHashSet;

/// Hierarchical facet index
#[derive(Debug, Clone)]
pub struct FacetIndex {
    registry: HierarchyRegistry,
    /// Reject leaf terms that are not declared
    strict: bool,
    forward: ForwardStore,
    inverted: InvertedStore,
    /// Bumped on every mutation that changes state
    version: u64,
}

impl FacetIndex {
    /// Build an empty index from configuration
    pub fn new(config: &FacetConfig) -> Result<Self> {
        let registry = HierarchyRegistry::new(config.syntax(), &config.facets)?;
        Ok(Self::from_registry(registry, config.strict))
    }

    /// Build an empty strict index with default syntax
    pub fn with_facets<I, S>(facets: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let registry = HierarchyRegistry::new(FacetSyntax::default(), facets)?;
        Ok(Self::from_registry(registry, true))
    }

    /// Build an empty index over an existing registry
    pub fn from_registry(registry: HierarchyRegistry, strict: bool) -> Self {
        FacetIndex {
            registry,
            strict,
            forward: ForwardStore::new(),
            inverted: InvertedStore::new(),
            version: 0,
        }
    }

    /// The declared hierarchy
    pub fn registry(&self) -> &HierarchyRegistry {
        &self.registry
    }

    /// Path syntax in use
    pub fn syntax(&self) -> &FacetSyntax {
        self.registry.syntax()
    }

    /// Whether undeclared leaf terms are rejected
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    // ========================================================================
    // Index Updates
    // ========================================================================

    /// Index `docid` under the given leaf terms
    ///
    /// Replaces any previous entry for `docid`. Duplicate leaf terms are
    /// collapsed.
    ///
    /// # Errors
    ///
    /// `Error::InvalidPath` for a malformed term and, in strict mode,
    /// `Error::UnknownFacet` for an undeclared one. On error the index is
    /// unchanged, including any previous entry for `docid`.
    pub fn index_doc<I>(&mut self, docid: DocId, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let leaf_terms = self.validate_terms(values)?;

        if self.forward.contains(docid) {
            self.unpost(docid);
        }
        for leaf in &leaf_terms {
            for term in self.registry.ancestors_of(leaf) {
                self.inverted.add(term, docid);
            }
        }
        tracing::debug!(docid, leaf_terms = leaf_terms.len(), "Indexed document");
        self.forward.put(docid, leaf_terms);
        self.version += 1;
        Ok(())
    }

    /// Remove `docid` from the index
    ///
    /// Returns false if the document was not indexed; that is not an error.
    pub fn unindex_doc(&mut self, docid: DocId) -> bool {
        if !self.unpost(docid) {
            return false;
        }
        tracing::debug!(docid, "Unindexed document");
        self.version += 1;
        true
    }

    /// Drop every document. The hierarchy is kept.
    pub fn clear(&mut self) {
        self.forward.clear();
        self.inverted.clear();
        self.version += 1;
    }

    fn validate_terms<I>(&self, values: I) -> Result<Vec<String>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut leaf_terms = Vec::new();
        for value in values {
            let term = value.as_ref();
            self.syntax()
                .validate(term)
                .map_err(|e| Error::invalid_path(term, e))?;
            if self.strict && !self.registry.is_known(term) {
                tracing::warn!(term, "Rejected undeclared facet");
                return Err(Error::UnknownFacet(term.to_string()));
            }
            if seen.insert(term.to_string()) {
                leaf_terms.push(term.to_string());
            }
        }
        Ok(leaf_terms)
    }

    /// Remove all postings of `docid`. Returns false if it was not indexed.
    fn unpost(&mut self, docid: DocId) -> bool {
        let Some(leaf_terms) = self.forward.remove(docid) else {
            return false;
        };
        for leaf in leaf_terms.iter() {
            for term in self.registry.ancestors_of(leaf) {
                self.inverted.discard(term, docid);
            }
        }
        true
    }

    // ========================================================================
    // Query
    // ========================================================================

    /// Read-only query view over the current state
    pub fn query_engine(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.registry, &self.forward, &self.inverted)
    }

    /// Documents matching every term in `query`
    pub fn search(&self, query: &[&str]) -> DocSet {
        self.query_engine().search(query)
    }

    /// Drill-down counts for `result` under the active `query`
    pub fn counts(&self, result: &DocSet, query: &[&str]) -> FacetCountMap {
        self.query_engine().counts(result, query)
    }

    /// `search` followed by `counts` on its result
    pub fn search_with_counts(&self, query: &[&str]) -> (DocSet, FacetCountMap) {
        let engine = self.query_engine();
        let result = engine.search(query);
        let counts = engine.counts(&result, query);
        (result, counts)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Number of indexed documents
    pub fn document_count(&self) -> u64 {
        self.forward.len() as u64
    }

    /// Number of terms (at any depth) matching at least one document
    pub fn term_count(&self) -> usize {
        self.inverted.len()
    }

    /// Number of documents posted under `term`
    pub fn doc_freq(&self, term: &str) -> u64 {
        self.inverted.doc_freq(term)
    }

    /// Every indexed document
    pub fn docids(&self) -> DocSet {
        self.forward.docids()
    }

    /// Whether `docid` is indexed
    pub fn contains(&self, docid: DocId) -> bool {
        self.forward.contains(docid)
    }

    /// Leaf terms `docid` was indexed with
    pub fn indexed_terms(&self, docid: DocId) -> Option<&[String]> {
        self.forward.get(docid)
    }

    /// Current version watermark
    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn forward(&self) -> &ForwardStore {
        &self.forward
    }

    /// Verify that the inverted store matches what the forward store implies
    ///
    /// # Errors
    ///
    /// `Error::Corruption` describing the first mismatching term.
    pub fn check_consistency(&self) -> Result<()> {
        let mut expected = InvertedStore::new();
        for (docid, leaf_terms) in self.forward.iter() {
            for leaf in leaf_terms {
                for term in self.registry.ancestors_of(leaf) {
                    expected.add(term, docid);
                }
            }
        }
        if expected == self.inverted {
            return Ok(());
        }

        let mismatch = expected
            .terms()
            .chain(self.inverted.terms())
            .find(|term| expected.members(term) != self.inverted.members(term))
            .unwrap_or("<unknown>");
        Err(Error::Corruption(format!(
            "posting set for '{}' has {} documents, forward store implies {}",
            mismatch,
            self.inverted.doc_freq(mismatch),
            expected.doc_freq(mismatch)
        )))
    }
}

impl FacetCounts for FacetIndex {
    fn counts(&self, result: &DocSet, query: &[&str]) -> FacetCountMap {
        FacetIndex::counts(self, result, query)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_index() -> FacetIndex {
        FacetIndex::with_facets([
            "color",
            "color:blue",
            "color:red",
            "size",
            "size:large",
            "style",
            "style:gucci",
            "style:gucci:handbag",
        ])
        .unwrap()
    }

    fn ids(set: &DocSet) -> Vec<DocId> {
        set.iter().collect()
    }

    #[test]
    fn test_index_posts_ancestors() {
        let mut index = test_index();
        index.index_doc(1, ["style:gucci:handbag"]).unwrap();

        assert_eq!(ids(&index.search(&["style"])), vec![1]);
        assert_eq!(ids(&index.search(&["style:gucci"])), vec![1]);
        assert_eq!(ids(&index.search(&["style:gucci:handbag"])), vec![1]);
        assert_eq!(index.term_count(), 3);
        assert_eq!(
            index.indexed_terms(1),
            Some(&["style:gucci:handbag".to_string()][..])
        );
    }

    #[test]
    fn test_unindex_removes_everything() {
        let mut index = test_index();
        index.index_doc(1, ["style:gucci:handbag", "color:red"]).unwrap();
        index.index_doc(2, ["style:gucci"]).unwrap();

        assert!(index.unindex_doc(1));
        assert_eq!(ids(&index.search(&["style"])), vec![2]);
        assert!(index.search(&["style:gucci:handbag"]).is_empty());
        assert!(index.search(&["color"]).is_empty());
        assert_eq!(index.document_count(), 1);
        index.check_consistency().unwrap();
    }

    #[test]
    fn test_unindex_unknown_is_noop() {
        let mut index = test_index();
        let v0 = index.version();
        assert!(!index.unindex_doc(42));
        assert_eq!(index.version(), v0);
    }

    #[test]
    fn test_reindex_replaces() {
        let mut index = test_index();
        index.index_doc(1, ["color:blue"]).unwrap();
        index.index_doc(1, ["size:large"]).unwrap();

        assert!(index.search(&["color"]).is_empty());
        assert_eq!(ids(&index.search(&["size"])), vec![1]);
        assert_eq!(index.document_count(), 1);
        index.check_consistency().unwrap();
    }

    #[test]
    fn test_shared_ancestor_survives_sibling_removal() {
        let mut index = test_index();
        index.index_doc(1, ["color:blue", "color:red"]).unwrap();
        index.index_doc(1, ["color:red"]).unwrap();
        assert_eq!(ids(&index.search(&["color"])), vec![1]);
        assert!(index.search(&["color:blue"]).is_empty());
    }

    #[test]
    fn test_malformed_term_rejected() {
        let mut index = test_index();
        for bad in ["", ":color", "color:", "color::blue"] {
            let err = index.index_doc(1, [bad]).unwrap_err();
            assert!(matches!(err, Error::InvalidPath { .. }), "{bad:?}");
        }
        assert_eq!(index.document_count(), 0);
        assert_eq!(index.term_count(), 0);
    }

    #[test]
    fn test_strict_rejects_unknown_leaf() {
        let mut index = test_index();
        let err = index.index_doc(1, ["size:huge"]).unwrap_err();
        assert!(matches!(err, Error::UnknownFacet(ref t) if t == "size:huge"));
    }

    #[test]
    fn test_failed_reindex_keeps_previous_entry() {
        let mut index = test_index();
        index.index_doc(1, ["color:blue"]).unwrap();
        let v = index.version();

        assert!(index.index_doc(1, ["color:blue", "color::red"]).is_err());
        assert_eq!(ids(&index.search(&["color:blue"])), vec![1]);
        assert_eq!(index.version(), v);
    }

    #[test]
    fn test_lenient_accepts_unknown_leaf() {
        let registry =
            HierarchyRegistry::new(FacetSyntax::default(), ["size", "size:large"]).unwrap();
        let mut index = FacetIndex::from_registry(registry, false);
        index.index_doc(1, ["size:huge"]).unwrap();

        assert_eq!(ids(&index.search(&["size"])), vec![1]);
        assert_eq!(ids(&index.search(&["size:huge"])), vec![1]);
        // Only declared facets are reported
        let counts = index.counts(&index.docids(), &[]);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts["size"], 1);
    }

    #[test]
    fn test_duplicate_leaf_terms_collapsed() {
        let mut index = test_index();
        index.index_doc(1, ["color:red", "color:red"]).unwrap();
        assert_eq!(index.indexed_terms(1).unwrap().len(), 1);
        assert!(index.unindex_doc(1));
        assert!(index.search(&["color:red"]).is_empty());
    }

    #[test]
    fn test_empty_leaf_set_is_indexed() {
        let mut index = test_index();
        index.index_doc(5, Vec::<String>::new()).unwrap();
        assert!(index.contains(5));
        assert_eq!(ids(&index.search(&[])), vec![5]);
        assert_eq!(index.term_count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut index = test_index();
        index.index_doc(1, ["color:red"]).unwrap();
        let v1 = index.version();
        index.clear();

        assert!(index.version() > v1);
        assert_eq!(index.document_count(), 0);
        assert!(index.search(&["color"]).is_empty());
        assert_eq!(index.registry().len(), 8);
    }

    #[test]
    fn test_version_increment() {
        let mut index = test_index();
        let v0 = index.version();
        index.index_doc(1, ["color"]).unwrap();
        let v1 = index.version();
        index.unindex_doc(1);
        let v2 = index.version();

        assert!(v1 > v0);
        assert!(v2 > v1);
    }

    #[test]
    fn test_search_with_counts() {
        let mut index = test_index();
        index.index_doc(1, ["color:red", "size:large"]).unwrap();
        index.index_doc(2, ["color:blue"]).unwrap();

        let (result, counts) = index.search_with_counts(&["color:red"]);
        assert_eq!(ids(&result), vec![1]);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["size"], 1);
        assert_eq!(counts["size:large"], 1);
    }

    #[test]
    fn test_check_consistency_detects_drift() {
        let mut index = test_index();
        index.index_doc(1, ["color:red"]).unwrap();
        index.inverted.discard("color", 1);

        let err = index.check_consistency().unwrap_err();
        assert!(matches!(err, Error::Corruption(ref msg) if msg.contains("'color'")));
    }
}
