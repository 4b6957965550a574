//! Query Engine
//!
//! `search` is a conjunction over posting sets; because every document is
//! posted under the ancestors of its leaf terms, a query on `style` matches
//! documents indexed anywhere below it.
//!
//! `counts` reports drill-down refinements. Candidates are all declared
//! facets except those already implied by the query (each query term and its
//! ancestors). The walk goes top-down through the hierarchy and prunes a
//! subtree as soon as its root has no documents in the result, which is
//! sound because a child's postings are always a subset of its parent's.

use crate::forward::ForwardStore;
use crate::hierarchy::HierarchyRegistry;
use crate::inverted::InvertedStore;
use facetdb_core::{DocSet, FacetCountMap};
use rustc_hash::FxHashSet;

/// Read-only view over the index state for answering queries
#[derive(Clone, Copy)]
pub struct QueryEngine<'a> {
    registry: &'a HierarchyRegistry,
    forward: &'a ForwardStore,
    inverted: &'a InvertedStore,
}

impl<'a> QueryEngine<'a> {
    /// Build a view over the three stores
    pub fn new(
        registry: &'a HierarchyRegistry,
        forward: &'a ForwardStore,
        inverted: &'a InvertedStore,
    ) -> Self {
        QueryEngine {
            registry,
            forward,
            inverted,
        }
    }

    /// Documents matching every term in `query`
    ///
    /// An empty query matches every indexed document. Unknown terms match
    /// nothing. Term order and duplicates do not affect the result.
    pub fn search(&self, query: &[&str]) -> DocSet {
        if query.is_empty() {
            return self.forward.docids();
        }

        // Intersect smallest-first so the working set shrinks quickly.
        let mut sets: Vec<&DocSet> = query.iter().map(|t| self.inverted.members(t)).collect();
        sets.sort_by_key(|docs| docs.len());

        let mut result = sets[0].clone();
        for docs in &sets[1..] {
            if result.is_empty() {
                break;
            }
            result &= *docs;
        }
        result
    }

    /// Drill-down counts for `result` under the active `query`
    ///
    /// Keys are declared facets that are neither a query term nor an
    /// ancestor of one; values are the number of documents in `result`
    /// posted under the facet. Zero counts are omitted.
    pub fn counts(&self, result: &DocSet, query: &[&str]) -> FacetCountMap {
        let mut counts = FacetCountMap::new();
        if result.is_empty() {
            return counts;
        }

        let excluded: FxHashSet<&str> = query
            .iter()
            .flat_map(|term| self.registry.ancestors_of(*term))
            .collect();

        let mut stack: Vec<&str> = self.registry.roots().collect();
        while let Some(path) = stack.pop() {
            let count = self.inverted.count(path, result);
            if count == 0 {
                continue;
            }
            if !excluded.contains(&path) {
                counts.insert(path.to_string(), count);
            }
            stack.extend(self.registry.children_of(path));
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facetdb_core::FacetSyntax;

    struct Fixture {
        registry: HierarchyRegistry,
        forward: ForwardStore,
        inverted: InvertedStore,
    }

    impl Fixture {
        fn new() -> Self {
            let registry = HierarchyRegistry::new(
                FacetSyntax::default(),
                ["color", "color:blue", "color:red", "size", "size:large"],
            )
            .unwrap();
            let mut fixture = Fixture {
                registry,
                forward: ForwardStore::new(),
                inverted: InvertedStore::new(),
            };
            fixture.post(1, &["color", "color:blue"]);
            fixture.post(2, &["color", "color:blue", "color:red"]);
            fixture.post(3, &["size", "size:large"]);
            fixture
        }

        fn post(&mut self, docid: u32, terms: &[&str]) {
            for term in terms {
                self.inverted.add(term, docid);
            }
            self.forward
                .put(docid, terms.iter().map(|t| t.to_string()).collect());
        }

        fn engine(&self) -> QueryEngine<'_> {
            QueryEngine::new(&self.registry, &self.forward, &self.inverted)
        }
    }

    fn ids(set: &DocSet) -> Vec<u32> {
        set.iter().collect()
    }

    #[test]
    fn test_search_conjunction() {
        let fx = Fixture::new();
        let engine = fx.engine();
        assert_eq!(ids(&engine.search(&["color"])), vec![1, 2]);
        assert_eq!(ids(&engine.search(&["color:blue", "color:red"])), vec![2]);
        assert_eq!(ids(&engine.search(&["color:red", "color:blue"])), vec![2]);
        assert_eq!(ids(&engine.search(&["color", "color", "color:red"])), vec![2]);
    }

    #[test]
    fn test_search_unknown_term_collapses() {
        let fx = Fixture::new();
        let engine = fx.engine();
        assert!(engine.search(&["nonexistent"]).is_empty());
        assert!(engine.search(&["color", "nonexistent"]).is_empty());
    }

    #[test]
    fn test_search_empty_query_matches_all() {
        let fx = Fixture::new();
        assert_eq!(ids(&fx.engine().search(&[])), vec![1, 2, 3]);
    }

    #[test]
    fn test_counts_top_level() {
        let fx = Fixture::new();
        let engine = fx.engine();
        let all = engine.search(&[]);
        let counts = engine.counts(&all, &[]);
        assert_eq!(counts["color"], 2);
        assert_eq!(counts["color:blue"], 2);
        assert_eq!(counts["color:red"], 1);
        assert_eq!(counts["size"], 1);
        assert_eq!(counts["size:large"], 1);
        assert_eq!(counts.len(), 5);
    }

    #[test]
    fn test_counts_excludes_selection_and_zero() {
        let fx = Fixture::new();
        let engine = fx.engine();
        let result = engine.search(&["color:red"]);
        let counts = engine.counts(&result, &["color:red"]);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts["color:blue"], 1);
    }

    #[test]
    fn test_counts_empty_result() {
        let fx = Fixture::new();
        assert!(fx.engine().counts(&DocSet::new(), &[]).is_empty());
    }
}
