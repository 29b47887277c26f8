use std::fmt;

use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer, TokenStream};

/// Tokens shorter than this are dropped (single letters, lone digits).
pub const MIN_TOKEN_CHARS: usize = 2;

pub fn build_analyzer() -> TextAnalyzer {
	TextAnalyzer::builder(SimpleTokenizer::default())
		.filter(LowerCaser)
		.build()
}

/// Word tokenizer shared by fitting and querying: lower-cases, splits on
/// anything that is not alphanumeric, keeps words of two or more characters.
#[derive(Clone)]
pub struct Tokenizer {
	analyzer: TextAnalyzer,
}

impl Default for Tokenizer {
	fn default() -> Self { Self { analyzer: build_analyzer() } }
}

impl fmt::Debug for Tokenizer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("Tokenizer") }
}

impl Tokenizer {
	pub fn tokens(&self, text: &str) -> Vec<String> {
		let mut analyzer = self.analyzer.clone();
		let mut stream = analyzer.token_stream(text);
		let mut tokens = Vec::new();
		while let Some(token) = stream.next() {
			if token.text.chars().count() >= MIN_TOKEN_CHARS { tokens.push(token.text.clone()); }
		}
		tokens
	}
}
