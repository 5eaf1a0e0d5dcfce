//! citedb-engine
//!
//! Question answering over one corpus and one companion document: ranking,
//! the per-session answer log, and explicit caches for the vector space and
//! page snapshots.

pub mod answer;
pub mod cache;
pub mod engine;
pub mod session;

pub use answer::{Answer, Snapshot};
pub use cache::{CorpusIndex, IndexCache, SnapshotCache};
pub use engine::QaEngine;
pub use session::SessionLog;
