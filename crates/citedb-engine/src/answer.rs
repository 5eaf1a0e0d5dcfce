use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use citedb_core::types::QueryResult;

/// The grounding answer plus the other relevant angles, best first.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub question: String,
    pub top: QueryResult,
    pub alternates: Vec<QueryResult>,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = &self.top.entry;
        writeln!(f, "### Theme: {}", e.theme)?;
        if !e.chapter.is_empty() { writeln!(f, "Chapter: {}", e.chapter)?; }
        writeln!(f, "{}", e.claim)?;
        writeln!(f, "> \u{201c}{}\u{201d} ({})", e.quote, e.page_ref)?;
        writeln!(f, "Design Guideline: {}", e.design_guideline)?;
        writeln!(f, "Grounding: {} (score {:.3})", e.page_ref, self.top.score)?;
        if !self.alternates.is_empty() {
            writeln!(f)?;
            writeln!(f, "Other relevant angles:")?;
            for alt in &self.alternates {
                writeln!(f, "- {}: {} (see {})", alt.entry.theme, alt.entry.claim, alt.entry.page_ref)?;
            }
        }
        Ok(())
    }
}

/// Outcome of a snapshot request; failures carry a message for the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    Image { page: u32, png: Arc<Vec<u8>> },
    Unavailable(String),
}

impl Snapshot {
    pub fn is_available(&self) -> bool { matches!(self, Snapshot::Image { .. }) }
}

#[cfg(test)]
mod tests {
    use super::Answer;
    use citedb_core::types::{CorpusEntry, QueryResult, RawRecord};

    fn result(index: usize, score: f32, theme: &str, claim: &str, page_ref: &str) -> QueryResult {
        let entry = CorpusEntry::from_record(RawRecord {
            chapter: "12".into(),
            theme: theme.into(),
            claim: claim.into(),
            quote: "We are our information".into(),
            page_ref: page_ref.into(),
            design_guideline: "Minimise retained data".into(),
        })
        .expect("valid entry");
        QueryResult { index, score, entry }
    }

    #[test]
    fn display_shows_grounding_and_other_angles() {
        let answer = Answer {
            question: "what is privacy?".into(),
            top: result(0, 0.5, "Privacy", "Data is a self", "p.231"),
            alternates: vec![result(2, 0.25, "Trust", "Trust is second order", "p.40")],
        };
        let text = answer.to_string();

        assert!(text.starts_with("### Theme: Privacy\nChapter: 12\nData is a self\n"));
        assert!(text.contains("> \u{201c}We are our information\u{201d} (p.231)\n"));
        assert!(text.contains("Design Guideline: Minimise retained data\n"));
        assert!(text.contains("Grounding: p.231 (score 0.500)\n"));
        assert!(text.ends_with("\nOther relevant angles:\n- Trust: Trust is second order (see p.40)\n"));
    }

    #[test]
    fn display_omits_angles_when_there_are_none() {
        let answer = Answer { question: "q".into(), top: result(0, 1.0, "Privacy", "Data is a self", "p.1"), alternates: vec![] };
        assert!(!answer.to_string().contains("Other relevant angles"));
    }
}
