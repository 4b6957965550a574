//! Inverted Store: term -> documents
//!
//! One posting bitmap per facet term, at every depth. A document indexed at
//! `style:gucci:handbag` is posted under `style`, `style:gucci` and the leaf
//! itself; this store does not know about that expansion and simply holds
//! whatever (term, docid) pairs the index adds.
//!
//! Terms whose posting set becomes empty are dropped, so `len()` is the
//! number of terms that currently match at least one document.

use facetdb_core::{DocId, DocSet};
use rustc_hash::FxHashMap;

/// term -> posting bitmap
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvertedStore {
    postings: FxHashMap<String, DocSet>,
    /// Returned by `members` for unknown terms
    empty: DocSet,
}

impl InvertedStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Post `docid` under `term`. Idempotent.
    pub fn add(&mut self, term: &str, docid: DocId) {
        match self.postings.get_mut(term) {
            Some(docs) => {
                docs.insert(docid);
            }
            None => {
                let mut docs = DocSet::new();
                docs.insert(docid);
                self.postings.insert(term.to_string(), docs);
            }
        }
    }

    /// Remove `docid` from `term`. No-op if it is not posted there.
    ///
    /// Returns true if the posting existed.
    pub fn discard(&mut self, term: &str, docid: DocId) -> bool {
        let Some(docs) = self.postings.get_mut(term) else {
            return false;
        };
        let removed = docs.remove(docid);
        if docs.is_empty() {
            self.postings.remove(term);
        }
        removed
    }

    /// Documents posted under `term`. Empty for unknown terms.
    pub fn members(&self, term: &str) -> &DocSet {
        self.postings.get(term).unwrap_or(&self.empty)
    }

    /// Size of `members(term) ∩ within`
    pub fn count(&self, term: &str, within: &DocSet) -> u64 {
        match self.postings.get(term) {
            Some(docs) => docs.intersection_len(within),
            None => 0,
        }
    }

    /// Number of documents posted under `term`
    pub fn doc_freq(&self, term: &str) -> u64 {
        self.postings.get(term).map(|docs| docs.len()).unwrap_or(0)
    }

    /// Number of terms with at least one posting
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// True if nothing is posted
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// All terms with at least one posting, in no particular order
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.postings.keys().map(String::as_str)
    }

    /// Drop all postings
    pub fn clear(&mut self) {
        self.postings.clear();
    }
}
