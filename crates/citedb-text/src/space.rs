//! TF-IDF vector space frozen at build time, and cosine ranking against it.
//!
//! Row weights are raw term counts times the smoothed IDF
//! `ln((1 + n) / (1 + df)) + 1`, L2-normalised, so cosine similarity is a
//! sparse dot product. Queries reuse the vocabulary and IDF; unknown terms
//! contribute nothing.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};

use citedb_core::error::RetrievalError;
use citedb_core::traits::Ranker;
use citedb_core::types::{CorpusEntry, QueryResult};

use crate::tokenize::TermTokenizer;

/// Sparse embedding: `(dimension, weight)` pairs sorted by dimension.
pub type SparseVector = Vec<(usize, f32)>;

pub struct VectorSpace {
	entries: Vec<CorpusEntry>,
	tokenizer: TermTokenizer,
	vocabulary: HashMap<String, usize>,
	idf: Vec<f32>,
	matrix: Vec<SparseVector>,
}

impl VectorSpace {
	/// Build the vocabulary, IDF weights and one row per entry.
	///
	/// Fails with `EmptyCorpus` when there are no entries or no entry
	/// produces a single term.
	pub fn build(entries: Vec<CorpusEntry>) -> Result<Self, RetrievalError> {
		if entries.is_empty() { return Err(RetrievalError::EmptyCorpus); }
		let tokenizer = TermTokenizer::new()?;

		let counts: Vec<HashMap<String, f32>> = entries.iter().map(|e| count_terms(&tokenizer, e.retrieval_text())).collect();
		let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
		for doc in &counts {
			for term in doc.keys() { *document_frequency.entry(term.as_str()).or_insert(0) += 1; }
		}
		if document_frequency.is_empty() { return Err(RetrievalError::EmptyCorpus); }

		// BTreeMap iteration gives alphabetical, reproducible dimensions.
		let n = entries.len() as f32;
		let mut vocabulary = HashMap::with_capacity(document_frequency.len());
		let mut idf = Vec::with_capacity(document_frequency.len());
		for (dim, (term, df)) in document_frequency.iter().enumerate() {
			vocabulary.insert((*term).to_string(), dim);
			idf.push(((1.0 + n) / (1.0 + *df as f32)).ln() + 1.0);
		}

		let matrix = counts.iter().map(|doc| weigh(doc, &vocabulary, &idf)).collect();
		info!(entries = entries.len(), dimensions = idf.len(), "built vector space");
		Ok(Self { entries, tokenizer, vocabulary, idf, matrix })
	}

	pub fn len(&self) -> usize { self.entries.len() }

	pub fn is_empty(&self) -> bool { self.entries.is_empty() }

	pub fn dimensions(&self) -> usize { self.idf.len() }

	pub fn dimension_of(&self, term: &str) -> Option<usize> { self.vocabulary.get(term).copied() }

	pub fn row(&self, index: usize) -> Option<&SparseVector> { self.matrix.get(index) }

	/// Embed free text with the frozen vocabulary.
	pub fn embed(&self, text: &str) -> SparseVector {
		weigh(&count_terms(&self.tokenizer, text), &self.vocabulary, &self.idf)
	}

	/// Cosine similarity of `query` against every row, in corpus order.
	pub fn similarities(&self, query: &str) -> Vec<f32> {
		let q = self.embed(query);
		self.matrix.iter().map(|row| dot(&q, row).clamp(0.0, 1.0)).collect()
	}

	/// Top `min(k, len)` entries by descending cosine similarity. Equal scores
	/// keep corpus order. `k == 0` is treated as 1.
	pub fn rank(&self, query: &str, k: usize) -> Result<Vec<QueryResult>, RetrievalError> {
		if self.entries.is_empty() || self.idf.is_empty() { return Err(RetrievalError::EmptyCorpus); }
		let mut scored: Vec<(usize, f32)> = self.similarities(query).into_iter().enumerate().collect();
		// sort_by is stable: ties stay in corpus order
		scored.sort_by(|a, b| b.1.total_cmp(&a.1));
		scored.truncate(k.max(1).min(self.entries.len()));
		debug!(query, hits = scored.len(), top = scored.first().map(|s| s.1), "ranked query");
		Ok(scored.into_iter().map(|(index, score)| QueryResult { index, score, entry: self.entries[index].clone() }).collect())
	}
}

impl Ranker for VectorSpace {
	fn entries(&self) -> &[CorpusEntry] { &self.entries }
	fn rank(&self, query: &str, k: usize) -> Result<Vec<QueryResult>, RetrievalError> { Self::rank(self, query, k) }
}

fn count_terms(tokenizer: &TermTokenizer, text: &str) -> HashMap<String, f32> {
	let mut counts = HashMap::new();
	for term in tokenizer.terms(text) { *counts.entry(term).or_insert(0.0) += 1.0; }
	counts
}

fn weigh(counts: &HashMap<String, f32>, vocabulary: &HashMap<String, usize>, idf: &[f32]) -> SparseVector {
	let mut row: SparseVector = counts
		.iter()
		.filter_map(|(term, tf)| vocabulary.get(term).map(|&dim| (dim, tf * idf[dim])))
		.collect();
	row.sort_unstable_by_key(|&(dim, _)| dim);
	let norm = row.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
	if norm > 0.0 { for (_, w) in &mut row { *w /= norm; } }
	row
}

fn dot(a: &SparseVector, b: &SparseVector) -> f32 {
	let (mut i, mut j, mut sum) = (0, 0, 0.0f32);
	while i < a.len() && j < b.len() {
		match a[i].0.cmp(&b[j].0) {
			std::cmp::Ordering::Less => i += 1,
			std::cmp::Ordering::Greater => j += 1,
			std::cmp::Ordering::Equal => { sum += a[i].1 * b[j].1; i += 1; j += 1; }
		}
	}
	sum
}
