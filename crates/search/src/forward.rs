//! Forward Store: docid -> leaf terms
//!
//! Holds exactly the leaf terms each document was indexed with. Ancestor
//! terms are never stored; they are re-derived on removal. This map is the
//! authoritative record of what the index added, and the inverted store can
//! be rebuilt from it.

use facetdb_core::{DocId, DocSet};
use rustc_hash::FxHashMap;

/// docid -> leaf terms
#[derive(Debug, Clone, Default)]
pub struct ForwardStore {
    docs: FxHashMap<DocId, Box<[String]>>,
}

impl ForwardStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `leaf_terms` for `docid`, returning the previous terms if any
    pub fn put(&mut self, docid: DocId, leaf_terms: Vec<String>) -> Option<Box<[String]>> {
        self.docs.insert(docid, leaf_terms.into_boxed_slice())
    }

    /// Remove and return the stored terms. `None` if absent.
    pub fn remove(&mut self, docid: DocId) -> Option<Box<[String]>> {
        self.docs.remove(&docid)
    }

    /// Stored leaf terms for `docid`
    pub fn get(&self, docid: DocId) -> Option<&[String]> {
        self.docs.get(&docid).map(|terms| &terms[..])
    }

    /// Whether `docid` is stored
    pub fn contains(&self, docid: DocId) -> bool {
        self.docs.contains_key(&docid)
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// True if no documents are stored
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Every stored docid
    pub fn docids(&self) -> DocSet {
        self.docs.keys().copied().collect()
    }

    /// Iterate over (docid, leaf terms) in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (DocId, &[String])> + '_ {
        self.docs.iter().map(|(&docid, terms)| (docid, &terms[..]))
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.docs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_put_get() {
        let mut store = ForwardStore::new();
        assert!(store.put(1, terms(&["color:blue"])).is_none());
        assert_eq!(store.get(1), Some(&terms(&["color:blue"])[..]));
        assert!(store.contains(1));
        assert_eq!(store.get(2), None);
    }

    #[test]
    fn test_put_replaces() {
        let mut store = ForwardStore::new();
        store.put(1, terms(&["color:blue"]));
        let previous = store.put(1, terms(&["color:red"])).unwrap();
        assert_eq!(&previous[..], &terms(&["color:blue"])[..]);
        assert_eq!(store.get(1), Some(&terms(&["color:red"])[..]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_none() {
        let mut store = ForwardStore::new();
        assert!(store.remove(7).is_none());
        store.put(7, terms(&["size"]));
        assert!(store.remove(7).is_some());
        assert!(store.remove(7).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_docids() {
        let mut store = ForwardStore::new();
        store.put(3, terms(&["a"]));
        store.put(1, terms(&["b"]));
        let ids: Vec<DocId> = store.docids().iter().collect();
        assert_eq!(ids, vec![1, 3]);
        store.clear();
        assert!(store.docids().is_empty());
    }
}
