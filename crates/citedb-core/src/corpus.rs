//! Dataset loading: CSV bytes to an ordered, validated set of corpus entries.
//!
//! Rows that cannot be parsed, or that carry more fields than the header, are
//! skipped. Rows whose retrieval text is too short are dropped. Neither is fatal;
//! an empty result is rejected later when the vector space is built.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::CorpusError;
use crate::types::{CorpusEntry, Fingerprint, RawRecord, RECORD_FIELDS};

#[derive(Debug, Clone)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
    fingerprint: Fingerprint,
    skipped_rows: usize,
    dropped_entries: usize,
}

impl Corpus {
    pub fn entries(&self) -> &[CorpusEntry] { &self.entries }
    pub fn into_entries(self) -> Vec<CorpusEntry> { self.entries }
    pub fn fingerprint(&self) -> &Fingerprint { &self.fingerprint }
    /// Rows the CSV reader could not turn into a record.
    pub fn skipped_rows(&self) -> usize { self.skipped_rows }
    /// Records dropped because their retrieval text was too short.
    pub fn dropped_entries(&self) -> usize { self.dropped_entries }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

#[derive(Debug, Default)]
pub struct CorpusLoader;

impl CorpusLoader {
    pub fn new() -> Self { Self }

    pub fn load_file(&self, path: &Path) -> Result<Corpus, CorpusError> {
        let bytes = fs::read(path).map_err(|source| CorpusError::Io { path: path.to_path_buf(), source })?;
        let corpus = self.load_bytes(&bytes)?;
        info!(path = %path.display(), entries = corpus.len(), skipped = corpus.skipped_rows, dropped = corpus.dropped_entries, "loaded corpus");
        Ok(corpus)
    }

    pub fn load_bytes(&self, bytes: &[u8]) -> Result<Corpus, CorpusError> {
        let fingerprint = Fingerprint::of(bytes);
        let decoded = decode_text(bytes);
        let text = decoded.strip_prefix('\u{feff}').unwrap_or(&*decoded);

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(text.as_bytes());
        let headers = reader.headers()?.clone();
        for column in RECORD_FIELDS {
            if !headers.iter().any(|h| h == column) { warn!(column, "corpus is missing a column; using empty values"); }
        }

        let mut entries = Vec::new();
        let mut skipped_rows = 0usize;
        let mut dropped_entries = 0usize;
        for (row, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => { debug!(row, error = %e, "skipping unparseable row"); skipped_rows += 1; continue; }
            };
            if record.len() > headers.len() {
                debug!(row, fields = record.len(), expected = headers.len(), "skipping row with extra fields");
                skipped_rows += 1;
                continue;
            }
            let raw: RawRecord = match record.deserialize(Some(&headers)) {
                Ok(raw) => raw,
                Err(e) => { debug!(row, error = %e, "skipping undecodable row"); skipped_rows += 1; continue; }
            };
            match CorpusEntry::from_record(raw) {
                Some(entry) => entries.push(entry),
                None => dropped_entries += 1,
            }
        }
        Ok(Corpus { entries, fingerprint, skipped_rows, dropped_entries })
    }
}

/// UTF-8 when valid, otherwise Latin-1 (every byte maps to the same code point).
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            debug!("corpus is not valid UTF-8; decoding as Latin-1");
            Cow::Owned(bytes.iter().copied().map(char::from).collect())
        }
    }
}
