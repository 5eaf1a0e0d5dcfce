use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failures reading the dataset as a whole. Individual bad rows never surface here.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Could not read corpus {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Corpus header is unreadable: {0}")]
    Header(#[from] csv::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RetrievalError {
    #[error("Dataset contains no usable text; nothing to retrieve from")]
    EmptyCorpus,

    #[error("Question is blank")]
    BlankQuestion,

    #[error("Tokenizer could not be built: {0}")]
    Tokenizer(String),
}

/// Recoverable failures of the page snapshot feature.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Document has only {page_count} pages; requested p.{requested}")]
    PageOutOfRange { requested: u32, page_count: usize },

    #[error("Could not open document: {0}")]
    DocumentUnavailable(String),

    #[error("Could not render page {page}: {reason}")]
    Render { page: u32, reason: String },
}
