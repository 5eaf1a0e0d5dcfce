//! Fingerprint-keyed corpus index and rendered page caches.
//!
//! `IndexCache` keeps the last built vector space keyed by the dataset's
//! content fingerprint; a changed file triggers a full rebuild, an unchanged
//! one reuses the immutable snapshot. `SnapshotCache` keys rendered pages by
//! `(document identity, page number)`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use citedb_core::corpus::CorpusLoader;
use citedb_core::error::{CorpusError, Result, RetrievalError};
use citedb_core::traits::Ranker;
use citedb_core::types::{CorpusEntry, Fingerprint, QueryResult};
use citedb_text::VectorSpace;

/// A vector space together with the facts about the dataset it came from.
pub struct CorpusIndex {
    fingerprint: Fingerprint,
    space: VectorSpace,
    skipped_rows: usize,
    dropped_entries: usize,
}

impl CorpusIndex {
    pub fn build(bytes: &[u8]) -> Result<Self> {
        let corpus = CorpusLoader::new().load_bytes(bytes)?;
        let fingerprint = corpus.fingerprint().clone();
        let (skipped_rows, dropped_entries) = (corpus.skipped_rows(), corpus.dropped_entries());
        let space = VectorSpace::build(corpus.into_entries())?;
        Ok(Self { fingerprint, space, skipped_rows, dropped_entries })
    }

    pub fn fingerprint(&self) -> &Fingerprint { &self.fingerprint }
    pub fn space(&self) -> &VectorSpace { &self.space }
    pub fn skipped_rows(&self) -> usize { self.skipped_rows }
    pub fn dropped_entries(&self) -> usize { self.dropped_entries }
}

impl Ranker for CorpusIndex {
    fn entries(&self) -> &[CorpusEntry] { Ranker::entries(&self.space) }
    fn rank(&self, query: &str, k: usize) -> std::result::Result<Vec<QueryResult>, RetrievalError> { self.space.rank(query, k) }
}

#[derive(Default)]
pub struct IndexCache {
    current: Mutex<Option<Arc<CorpusIndex>>>,
}

impl IndexCache {
    pub fn new() -> Self { Self::default() }

    pub fn load_file(&self, path: &Path) -> Result<Arc<CorpusIndex>> {
        let bytes = fs::read(path).map_err(|source| CorpusError::Io { path: path.to_path_buf(), source })?;
        self.load_bytes(&bytes)
    }

    /// Reuse the cached index when `bytes` fingerprint-match it, else rebuild.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<Arc<CorpusIndex>> {
        let fingerprint = Fingerprint::of(bytes);
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(index) = current.as_ref().filter(|index| index.fingerprint == fingerprint) {
            debug!(%fingerprint, "corpus unchanged; reusing vector space");
            return Ok(Arc::clone(index));
        }
        let index = Arc::new(CorpusIndex::build(bytes)?);
        info!(%fingerprint, entries = index.space.len(), dimensions = index.space.dimensions(), "corpus index rebuilt");
        *current = Some(Arc::clone(&index));
        Ok(index)
    }
}

#[derive(Default)]
pub struct SnapshotCache {
    pages: Mutex<HashMap<(String, u32), Arc<Vec<u8>>>>,
}

impl SnapshotCache {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, document: &str, page: u32) -> Option<Arc<Vec<u8>>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner).get(&(document.to_string(), page)).cloned()
    }

    pub fn insert(&self, document: &str, page: u32, png: Vec<u8>) -> Arc<Vec<u8>> {
        let png = Arc::new(png);
        self.pages.lock().unwrap_or_else(PoisonError::into_inner).insert((document.to_string(), page), Arc::clone(&png));
        png
    }

    pub fn len(&self) -> usize { self.pages.lock().unwrap_or_else(PoisonError::into_inner).len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}
