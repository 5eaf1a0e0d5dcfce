use std::sync::Arc;

use tracing::{debug, info, warn};

use citedb_core::error::RetrievalError;
use citedb_core::traits::{DocumentSource, Ranker};
use citedb_core::types::AnswerRecord;
use citedb_pages::{render, resolve_first_page};

use crate::answer::{Answer, Snapshot};
use crate::cache::SnapshotCache;
use crate::session::SessionLog;

pub const NO_PAGE_MESSAGE: &str = "No page number could be parsed from this reference.";

pub struct QaEngine<R> where R: Ranker {
    ranker: Arc<R>,
    document: Box<dyn DocumentSource>,
    top_k: usize,
    snapshots: SnapshotCache,
}

impl<R> QaEngine<R> where R: Ranker {
    /// Refuses an empty ranker up front so no query is ever accepted without a corpus.
    pub fn new(ranker: Arc<R>, document: Box<dyn DocumentSource>, top_k: usize) -> Result<Self, RetrievalError> {
        if ranker.entries().is_empty() { return Err(RetrievalError::EmptyCorpus); }
        Ok(Self { ranker, document, top_k: top_k.max(1), snapshots: SnapshotCache::new() })
    }

    pub fn ranker(&self) -> &R { &self.ranker }

    pub fn top_k(&self) -> usize { self.top_k }

    /// Rank `question`, log the grounding answer to `session`, and return it
    /// with up to `top_k - 1` alternates.
    pub fn ask(&self, question: &str, session: &SessionLog) -> Result<Answer, RetrievalError> {
        let question = question.trim();
        if question.is_empty() { return Err(RetrievalError::BlankQuestion); }
        let mut results = self.ranker.rank(question, self.top_k)?.into_iter();
        let top = results.next().ok_or(RetrievalError::EmptyCorpus)?;
        let alternates: Vec<_> = results.collect();
        info!(question, theme = %top.entry.theme, score = top.score, alternates = alternates.len(), "answered");
        session.append(AnswerRecord::new(question, &top.entry));
        Ok(Answer { question: question.to_string(), top, alternates })
    }

    /// Snapshot of the first page named by `page_ref`. Never fails: problems
    /// come back as `Snapshot::Unavailable` with a reader-facing reason.
    pub fn get_page_snapshot(&self, page_ref: &str) -> Snapshot {
        let Some(page) = resolve_first_page(page_ref) else {
            debug!(page_ref, "no page in reference");
            return Snapshot::Unavailable(NO_PAGE_MESSAGE.to_string());
        };
        let identity = self.document.identity();
        if let Some(png) = self.snapshots.get(&identity, page) {
            debug!(page, "snapshot cache hit");
            return Snapshot::Image { page, png };
        }
        match render(page, self.document.as_ref()) {
            Ok(png) => Snapshot::Image { page, png: self.snapshots.insert(&identity, page, png) },
            Err(e) => {
                warn!(page, error = %e, "snapshot unavailable");
                Snapshot::Unavailable(e.to_string())
            }
        }
    }
}
