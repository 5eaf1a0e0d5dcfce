use tantivy::tokenizer::{LowerCaser, RegexTokenizer, StopWordFilter, TextAnalyzer, TokenStream};

use citedb_core::error::RetrievalError;

use crate::stop_words::ENGLISH_STOP_WORDS;

/// Runs of two or more word characters (letters, digits, `_`); shorter runs are not tokens.
const TOKEN_PATTERN: &str = r"\w\w+";

/// Turns text into the unigram + bigram terms the vector space is built from.
///
/// Extracts runs of two or more word characters (so `data_ethics` stays one
/// token), lowercases them and drops English stop-words. Bigrams join adjacent
/// surviving tokens with a single space.
#[derive(Clone)]
pub struct TermTokenizer {
	analyzer: TextAnalyzer,
}

impl TermTokenizer {
	pub fn new() -> Result<Self, RetrievalError> {
		let splitter = RegexTokenizer::new(TOKEN_PATTERN).map_err(|e| RetrievalError::Tokenizer(e.to_string()))?;
		let analyzer = TextAnalyzer::builder(splitter)
			.filter(LowerCaser)
			.filter(StopWordFilter::remove(ENGLISH_STOP_WORDS.iter().map(|s| s.to_string())))
			.build();
		Ok(Self { analyzer })
	}

	/// Surviving unigram tokens, in text order.
	pub fn tokens(&self, text: &str) -> Vec<String> {
		let mut analyzer = self.analyzer.clone();
		let mut stream = analyzer.token_stream(text);
		let mut tokens = Vec::new();
		while stream.advance() { tokens.push(stream.token().text.clone()); }
		tokens
	}

	/// Unigrams followed by bigrams, duplicates kept (they are counted).
	pub fn terms(&self, text: &str) -> Vec<String> {
		let tokens = self.tokens(text);
		let bigrams: Vec<String> = tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])).collect();
		let mut terms = tokens;
		terms.extend(bigrams);
		terms
	}
}
