//! Hierarchy Registry
//!
//! Built once from the configured facet list. Resolves parent/child
//! relationships between declared facets and supplies the candidate set for
//! drill-down counting. Ancestor expansion itself is syntactic and handled by
//! [`FacetSyntax`]; the registry only knows what was declared.

use facetdb_core::{Error, FacetSyntax, Result};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
struct Node {
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Immutable tree of declared facet paths
#[derive(Debug, Clone)]
pub struct HierarchyRegistry {
    syntax: FacetSyntax,
    /// Declared paths, in declaration order, without duplicates
    paths: Vec<String>,
    /// Path -> position in `paths`
    lookup: FxHashMap<String, usize>,
    nodes: Vec<Node>,
}

impl HierarchyRegistry {
    /// Build the registry from the declared facet paths
    ///
    /// Duplicates are ignored. Every path must be well formed and every
    /// ancestor of a declared path must itself be declared.
    pub fn new<I, S>(syntax: FacetSyntax, known: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut paths: Vec<String> = Vec::new();
        let mut lookup: FxHashMap<String, usize> = FxHashMap::default();

        for path in known {
            let path = path.as_ref();
            syntax
                .validate(path)
                .map_err(|e| Error::invalid_path(path, e))?;
            if !lookup.contains_key(path) {
                lookup.insert(path.to_string(), paths.len());
                paths.push(path.to_string());
            }
        }

        let mut nodes = vec![
            Node {
                parent: None,
                children: Vec::new(),
            };
            paths.len()
        ];
        for (pos, path) in paths.iter().enumerate() {
            // Every proper prefix must be declared; report the shortest missing one.
            if let Some(missing) = syntax
                .self_and_ancestors(path)
                .find(|prefix| prefix.len() < path.len() && !lookup.contains_key(*prefix))
            {
                return Err(Error::IncompleteHierarchy {
                    path: path.clone(),
                    missing: missing.to_string(),
                });
            }
            if let Some(parent) = syntax.parent(path) {
                let parent_pos = lookup[parent];
                nodes[pos].parent = Some(parent_pos);
                nodes[parent_pos].children.push(pos);
            }
        }

        tracing::info!(
            facets = paths.len(),
            roots = nodes.iter().filter(|n| n.parent.is_none()).count(),
            "Facet hierarchy registered"
        );

        Ok(HierarchyRegistry {
            syntax,
            paths,
            lookup,
            nodes,
        })
    }

    /// Path syntax the registry was built with
    pub fn syntax(&self) -> &FacetSyntax {
        &self.syntax
    }

    /// Whether `path` was declared
    pub fn is_known(&self, path: &str) -> bool {
        self.lookup.contains_key(path)
    }

    /// Declared paths in declaration order
    pub fn known_paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.paths.iter().map(String::as_str)
    }

    /// Number of declared paths
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True if no facets were declared
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// `path` plus every proper prefix, declared or not
    pub fn ancestors_of<'a>(&self, path: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.syntax.self_and_ancestors(path)
    }

    /// Declared parent of a declared path
    pub fn parent_of(&self, path: &str) -> Option<&str> {
        let pos = *self.lookup.get(path)?;
        self.nodes[pos].parent.map(|p| self.paths[p].as_str())
    }

    /// Declared direct children. Empty for unknown paths.
    pub fn children_of(&self, path: &str) -> impl Iterator<Item = &str> + '_ {
        self.lookup
            .get(path)
            .map(|&pos| self.nodes[pos].children.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&child| self.paths[child].as_str())
    }

    /// Top-level declared paths
    pub fn roots(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes
            .iter()
            .zip(&self.paths)
            .filter(|(node, _)| node.parent.is_none())
            .map(|(_, path)| path.as_str())
    }
}
