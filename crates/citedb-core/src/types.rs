//! Domain types shared by the loader, the vector space and the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column names every dataset row and every export row carries, in order.
pub const RECORD_FIELDS: [&str; 6] = ["chapter", "theme", "claim", "quote", "page_ref", "design_guideline"];

/// Entries whose `"{theme} {claim} {quote}"` text is this short or shorter are dropped at load time.
pub const MIN_RETRIEVAL_TEXT_CHARS: usize = 3;

/// One dataset row as read from disk. Missing columns stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub chapter: String,
    pub theme: String,
    pub claim: String,
    pub quote: String,
    pub page_ref: String,
    pub design_guideline: String,
}

/// One retrievable fact.
///
/// - `page_ref`: free-form citation, e.g. `"p.231–232"`
/// - `retrieval_text`: theme, claim and quote joined by single spaces; this is
///   the unit of vectorization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub chapter: String,
    pub theme: String,
    pub claim: String,
    pub quote: String,
    pub page_ref: String,
    pub design_guideline: String,
    retrieval_text: String,
}

impl CorpusEntry {
    /// Trim every field and derive the retrieval text. Returns `None` when all
    /// three parts are blank, or when `"{theme} {claim} {quote}"` is not longer
    /// than [`MIN_RETRIEVAL_TEXT_CHARS`].
    pub fn from_record(raw: RawRecord) -> Option<Self> {
        let field = |s: String| s.trim().to_string();
        let theme = field(raw.theme);
        let claim = field(raw.claim);
        let quote = field(raw.quote);
        let retrieval_text = [theme.as_str(), claim.as_str(), quote.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if retrieval_text.is_empty() {
            return None;
        }
        // Length is measured on all three parts with both separators, empty parts included.
        let joined_len = theme.chars().count() + claim.chars().count() + quote.chars().count() + 2;
        if joined_len <= MIN_RETRIEVAL_TEXT_CHARS {
            return None;
        }
        Some(Self {
            chapter: field(raw.chapter),
            theme,
            claim,
            quote,
            page_ref: field(raw.page_ref),
            design_guideline: field(raw.design_guideline),
            retrieval_text,
        })
    }

    pub fn retrieval_text(&self) -> &str { &self.retrieval_text }
}

/// One ranked corpus entry. `index` is the entry's position in the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub index: usize,
    pub score: f32,
    pub entry: CorpusEntry,
}

/// Session log row; field order matches the export header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: String,
    pub theme: String,
    pub claim: String,
    pub quote: String,
    pub page_ref: String,
    pub design_guideline: String,
}

impl AnswerRecord {
    pub fn new(question: &str, entry: &CorpusEntry) -> Self {
        Self {
            question: question.to_string(),
            theme: entry.theme.clone(),
            claim: entry.claim.clone(),
            quote: entry.quote.clone(),
            page_ref: entry.page_ref.clone(),
            design_guideline: entry.design_guideline.clone(),
        }
    }
}

/// Content fingerprint of a dataset (blake3, hex).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(bytes: &[u8]) -> Self { Self(blake3::hash(bytes).to_hex().to_string()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// An uncompressed RGBA page raster, row-major, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}
