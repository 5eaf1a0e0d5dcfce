use std::fs;
use tempfile::TempDir;

use citedb_core::corpus::CorpusLoader;
use citedb_core::error::CorpusError;
use citedb_core::types::{CorpusEntry, RawRecord};

const HEADER: &str = "chapter,theme,claim,quote,page_ref,design_guideline\n";

#[test]
fn load_file_trims_fields_and_builds_retrieval_text() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("corpus.csv");
    fs::write(&path, format!("{HEADER}  1 , Privacy ,  Data is a self ,\"We are our information\", p.231–232 , Minimise data \n")).unwrap();

    let corpus = CorpusLoader::new().load_file(&path).expect("load");

    assert_eq!(corpus.len(), 1);
    let entry = &corpus.entries()[0];
    assert_eq!(entry.chapter, "1");
    assert_eq!(entry.theme, "Privacy");
    assert_eq!(entry.page_ref, "p.231–232");
    assert_eq!(entry.design_guideline, "Minimise data");
    assert_eq!(entry.retrieval_text(), "Privacy Data is a self We are our information");
}

#[test]
fn missing_columns_default_to_empty() {
    let csv = "theme,claim\nEntropy,Harm to the infosphere\n";
    let corpus = CorpusLoader::new().load_bytes(csv.as_bytes()).expect("load");

    assert_eq!(corpus.len(), 1);
    let entry = &corpus.entries()[0];
    assert_eq!(entry.quote, "");
    assert_eq!(entry.page_ref, "");
    assert_eq!(entry.chapter, "");
}

#[test]
fn malformed_rows_are_skipped_not_fatal() {
    let csv = format!("{HEADER}1,Agency,Artificial agents act,quote one,p.10,g1\n2,Too,many,fields,p.1,g,extra,more\n3,Trust,Trust is second order,quote three,p.30,g3\n");
    let corpus = CorpusLoader::new().load_bytes(csv.as_bytes()).expect("load");

    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.skipped_rows(), 1);
    let themes: Vec<&str> = corpus.entries().iter().map(|e| e.theme.as_str()).collect();
    assert_eq!(themes, ["Agency", "Trust"]);
}

#[test]
fn short_and_blank_entries_are_dropped() {
    let csv = format!("{HEADER}1,,,,p.1,g\n2,a,,,p.2,g\n3,abcd,,,p.3,g\n4,   ,  ,  ,p.4,g\n5,,,z,p.5,g\n");
    let corpus = CorpusLoader::new().load_bytes(csv.as_bytes()).expect("load");

    assert_eq!(corpus.len(), 1, "only the four-character theme survives");
    assert_eq!(corpus.entries()[0].theme, "abcd");
    assert_eq!(corpus.dropped_entries(), 4);
}

#[test]
fn length_rule_counts_separators_of_empty_parts() {
    let csv = format!("{HEADER}1,ab,,,p.1,g\n2,,,xyz,p.2,g\n");
    let corpus = CorpusLoader::new().load_bytes(csv.as_bytes()).expect("load");

    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.entries()[0].retrieval_text(), "ab");
    assert_eq!(corpus.entries()[1].retrieval_text(), "xyz");
}

#[test]
fn latin1_bytes_are_decoded() {
    let mut bytes = HEADER.as_bytes().to_vec();
    bytes.extend_from_slice(b"1,Ontolog\xeda,Being is information,quote,p.5,g\n");
    let corpus = CorpusLoader::new().load_bytes(&bytes).expect("load");

    assert_eq!(corpus.entries()[0].theme, "Ontología");
}

#[test]
fn fingerprint_tracks_content() {
    let loader = CorpusLoader::new();
    let a = loader.load_bytes(format!("{HEADER}1,Alpha,claim a,quote a,p.1,g\n").as_bytes()).unwrap();
    let b = loader.load_bytes(format!("{HEADER}1,Alpha,claim a,quote a,p.1,g\n").as_bytes()).unwrap();
    let c = loader.load_bytes(format!("{HEADER}1,Beta,claim b,quote b,p.2,g\n").as_bytes()).unwrap();

    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());
}

#[test]
fn missing_file_is_an_io_error() {
    let tmp = TempDir::new().unwrap();
    let err = CorpusLoader::new().load_file(&tmp.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, CorpusError::Io { .. }));
}

#[test]
fn from_record_keeps_two_characters_and_rejects_one() {
    let two = RawRecord { theme: "ab".into(), ..Default::default() };
    assert!(CorpusEntry::from_record(two).is_some());
    let one = RawRecord { claim: " a ".into(), ..Default::default() };
    assert!(CorpusEntry::from_record(one).is_none());
}
