//! Append-only answer history for one session, exportable as CSV.

use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

use citedb_core::types::AnswerRecord;

/// Export header, in column order.
pub const EXPORT_FIELDS: [&str; 6] = ["question", "theme", "claim", "quote", "page_ref", "design_guideline"];

/// Caller-owned log; appends are serialized through a mutex.
#[derive(Debug, Default)]
pub struct SessionLog {
    records: Mutex<Vec<AnswerRecord>>,
}

impl SessionLog {
    pub fn new() -> Self { Self::default() }

    fn lock(&self) -> MutexGuard<'_, Vec<AnswerRecord>> { self.records.lock().unwrap_or_else(PoisonError::into_inner) }

    pub fn append(&self, record: AnswerRecord) { self.lock().push(record); }

    pub fn records(&self) -> Vec<AnswerRecord> { self.lock().clone() }

    pub fn len(&self) -> usize { self.lock().len() }

    pub fn is_empty(&self) -> bool { self.lock().is_empty() }

    /// Header row, then one row per answered question in the order asked.
    pub fn export_csv<W: Write>(&self, out: W) -> Result<(), csv::Error> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
        writer.write_record(EXPORT_FIELDS)?;
        for record in self.lock().iter() { writer.serialize(record)?; }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(question: &str) -> AnswerRecord {
        AnswerRecord {
            question: question.into(),
            theme: "Privacy".into(),
            claim: "claim, with comma".into(),
            quote: "a \"quoted\" line".into(),
            page_ref: "p.1".into(),
            design_guideline: "g".into(),
        }
    }

    #[test]
    fn empty_log_exports_header_only() {
        let mut out = Vec::new();
        SessionLog::new().export_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "question,theme,claim,quote,page_ref,design_guideline\n");
    }

    #[test]
    fn export_keeps_chronological_order_and_quotes_fields() {
        let log = SessionLog::new();
        log.append(record("first?"));
        log.append(record("second?"));
        let mut out = Vec::new();
        log.export_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("first?,Privacy,\"claim, with comma\",\"a \"\"quoted\"\" line\""));
        assert!(lines[2].starts_with("second?"));
    }
}
