use crate::error::{RetrievalError, SnapshotError};
use crate::types::{CorpusEntry, QueryResult, Raster};

/// Ranks corpus entries against a free-text query.
pub trait Ranker: Send + Sync {
    fn entries(&self) -> &[CorpusEntry];
    fn rank(&self, query: &str, k: usize) -> Result<Vec<QueryResult>, RetrievalError>;
}

/// A paginated companion document that can be opened on demand.
///
/// Every call to `open` hands out a fresh handle; callers drop it once the
/// page is rendered.
pub trait DocumentSource {
    /// Stable identity of the underlying document (path, content hash, ...).
    fn identity(&self) -> String;
    fn open(&self) -> Result<Box<dyn OpenDocument + '_>, SnapshotError>;
}

/// An open document handle, addressed by 0-based page index.
pub trait OpenDocument {
    fn page_count(&self) -> usize;
    fn rasterize(&self, index: usize, scale: f32) -> Result<Raster, SnapshotError>;
}
