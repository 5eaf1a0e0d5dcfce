//! citedb-text
//!
//! TF-IDF vector space over the corpus retrieval texts and cosine ranking of
//! free-text queries against it. Tokenization reuses a Tantivy text analyzer.

pub mod space;
pub mod stop_words;
pub mod tokenize;

pub use space::VectorSpace;
pub use tokenize::TermTokenizer;
