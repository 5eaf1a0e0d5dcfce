use citedb_core::error::RetrievalError;
use citedb_core::types::{CorpusEntry, RawRecord};
use citedb_text::VectorSpace;

fn entry(theme: &str, claim: &str, quote: &str) -> CorpusEntry {
    CorpusEntry::from_record(RawRecord {
        theme: theme.into(),
        claim: claim.into(),
        quote: quote.into(),
        page_ref: "p.1".into(),
        ..Default::default()
    })
    .expect("valid entry")
}

fn corpus() -> Vec<CorpusEntry> {
    vec![
        entry("Privacy", "Informational privacy protects personal identity", "You are your information"),
        entry("Entropy", "Metaphysical entropy degrades the infosphere", "Entropy ought not to be caused"),
        entry("Agency", "Artificial agents can be morally accountable", "Agents without responsibility"),
        entry("Trust", "Trust emerges between artificial agents", "Trust is a second order property"),
    ]
}

#[test]
fn build_has_one_row_per_entry() {
    let space = VectorSpace::build(corpus()).expect("space");
    assert_eq!(space.len(), 4);
    for i in 0..4 { assert!(space.row(i).is_some()); }
    assert!(space.row(4).is_none());
    assert!(space.dimensions() > 0);
}

#[test]
fn vocabulary_holds_bigrams_but_not_stop_words() {
    let space = VectorSpace::build(corpus()).expect("space");
    assert!(space.dimension_of("informational privacy").is_some());
    assert!(space.dimension_of("entropy").is_some());
    assert!(space.dimension_of("the").is_none());
    assert!(space.dimension_of("are").is_none());
}

#[test]
fn empty_corpus_is_rejected() {
    assert_eq!(VectorSpace::build(Vec::new()).err(), Some(RetrievalError::EmptyCorpus));
}

#[test]
fn stop_word_only_corpus_is_rejected() {
    let entries = vec![entry("the", "and of it", "was were"), entry("some", "then", "into")];
    assert_eq!(VectorSpace::build(entries).err(), Some(RetrievalError::EmptyCorpus));
}

#[test]
fn rank_returns_min_of_k_and_corpus_size() {
    let space = VectorSpace::build(corpus()).expect("space");
    assert_eq!(space.rank("privacy", 3).unwrap().len(), 3);
    assert_eq!(space.rank("privacy", 10).unwrap().len(), 4);
    assert_eq!(space.rank("privacy", 0).unwrap().len(), 1);
}

#[test]
fn scores_are_non_increasing_and_bounded() {
    let space = VectorSpace::build(corpus()).expect("space");
    for q in ["artificial agents trust", "entropy", "personal identity privacy", "unrelated words entirely"] {
        let results = space.rank(q, 4).unwrap();
        for pair in results.windows(2) { assert!(pair[0].score >= pair[1].score, "q='{q}'"); }
        for r in &results { assert!((0.0..=1.0).contains(&r.score)); }
    }
}

#[test]
fn verbatim_retrieval_text_wins() {
    let entries = corpus();
    let query = entries[1].retrieval_text().to_string();
    let space = VectorSpace::build(entries).expect("space");
    let results = space.rank(&query, 4).unwrap();
    assert_eq!(results[0].index, 1);
    assert!(results[0].score > results[1].score);
    assert!((results[0].score - 1.0).abs() < 1e-4);
}

#[test]
fn unknown_terms_tie_in_corpus_order() {
    let space = VectorSpace::build(corpus()).expect("space");
    let results = space.rank("zebra xylophone", 4).unwrap();
    let order: Vec<usize> = results.iter().map(|r| r.index).collect();
    assert_eq!(order, [0, 1, 2, 3]);
    assert!(results.iter().all(|r| r.score == 0.0));
}

#[test]
fn equal_scores_keep_corpus_order() {
    let mut first = entry("Agents", "agents act", "alpha");
    first.page_ref = "p.10".into();
    let mut second = entry("Agents", "agents act", "alpha");
    second.page_ref = "p.20".into();
    let entries = vec![entry("Governance", "policy design", "rules"), first, second];
    let space = VectorSpace::build(entries).expect("space");
    let results = space.rank("agents", 3).unwrap();
    assert_eq!(results[0].score, results[1].score);
    assert_eq!(results[0].entry.page_ref, "p.10");
    assert_eq!(results[1].entry.page_ref, "p.20");
    assert_eq!(results[2].index, 0);
}

#[test]
fn queries_do_not_grow_the_vocabulary() {
    let space = VectorSpace::build(corpus()).expect("space");
    let before = space.dimensions();
    let _ = space.rank("completely novel vocabulary here", 2).unwrap();
    assert_eq!(space.dimensions(), before);
    assert!(space.dimension_of("novel").is_none());
}
