//! Host-facing catalog wrapper
//!
//! `CatalogFacetIndex` adapts a [`FacetIndex`] to the generic
//! [`CatalogIndex`] contract. The host hands it whole documents; an injected
//! [`Discriminator`] extracts the facet values. A document for which the
//! discriminator yields `None` is not indexed here and is tracked in
//! `not_indexed` instead.

use crate::index::FacetIndex;
use facetdb_core::{
    CatalogIndex, DocId, DocSet, FacetConfig, FacetCountMap, FacetCounts, Result,
};
use std::marker::PhantomData;

/// Extracts facet values from a document
pub trait Discriminator<D: ?Sized> {
    /// Facet values for `doc`, or `None` if the document has none
    fn values(&self, doc: &D) -> Option<Vec<String>>;
}

impl<D: ?Sized, F> Discriminator<D> for F
where
    F: Fn(&D) -> Option<Vec<String>>,
{
    fn values(&self, doc: &D) -> Option<Vec<String>> {
        self(doc)
    }
}

/// Facet index driven through the generic catalog contract
pub struct CatalogFacetIndex<D: ?Sized, X> {
    index: FacetIndex,
    discriminator: X,
    not_indexed: DocSet,
    _doc: PhantomData<fn(&D)>,
}

impl<D: ?Sized, X: Discriminator<D>> CatalogFacetIndex<D, X> {
    /// Build from configuration and a discriminator
    pub fn new(config: &FacetConfig, discriminator: X) -> Result<Self> {
        Ok(Self::from_index(FacetIndex::new(config)?, discriminator))
    }

    /// Wrap an existing index
    pub fn from_index(index: FacetIndex, discriminator: X) -> Self {
        CatalogFacetIndex {
            index,
            discriminator,
            not_indexed: DocSet::new(),
            _doc: PhantomData,
        }
    }

    /// The underlying facet index
    pub fn index(&self) -> &FacetIndex {
        &self.index
    }

    /// Unwrap into the underlying facet index
    pub fn into_inner(self) -> FacetIndex {
        self.index
    }
}

impl<D: ?Sized, X: Discriminator<D>> CatalogIndex<D> for CatalogFacetIndex<D, X> {
    fn index_doc(&mut self, docid: DocId, doc: &D) -> Result<()> {
        match self.discriminator.values(doc) {
            Some(values) => {
                self.index.index_doc(docid, &values)?;
                self.not_indexed.remove(docid);
            }
            None => {
                self.index.unindex_doc(docid);
                self.not_indexed.insert(docid);
            }
        }
        Ok(())
    }

    fn unindex_doc(&mut self, docid: DocId) {
        self.index.unindex_doc(docid);
        self.not_indexed.remove(docid);
    }

    fn search(&self, query: &[&str]) -> DocSet {
        self.index.search(query)
    }

    fn clear(&mut self) {
        self.index.clear();
        self.not_indexed.clear();
    }

    fn document_count(&self) -> u64 {
        self.index.document_count()
    }

    fn docids(&self) -> DocSet {
        self.index.docids()
    }

    fn not_indexed(&self) -> DocSet {
        self.not_indexed.clone()
    }
}

impl<D: ?Sized, X: Discriminator<D>> FacetCounts for CatalogFacetIndex<D, X> {
    fn counts(&self, result: &DocSet, query: &[&str]) -> FacetCountMap {
        self.index.counts(result, query)
    }
}
