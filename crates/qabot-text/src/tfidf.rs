//! TF-IDF term weighting fitted on the corpus questions.
//!
//! `idf(t) = ln((1 + n) / (1 + df(t))) + 1`, weights are raw counts times idf,
//! and every vector is L2-normalized. Vocabulary columns follow lexicographic
//! term order so that fitting the same questions always yields the same model.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use qabot_core::error::{Error, Result};
use qabot_core::traits::TextEncoder;
use qabot_core::types::SparseVector;

use crate::tokenizer::Tokenizer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfModel {
	num_docs: usize,
	vocabulary: BTreeMap<String, usize>,
	idf: Vec<f32>,
	#[serde(skip)]
	tokenizer: Tokenizer,
}

impl TfidfModel {
	pub fn fit<S: AsRef<str>>(docs: &[S]) -> Result<Self> {
		if docs.is_empty() { return Err(Error::EmptyCorpus); }
		let tokenizer = Tokenizer::default();
		let mut df: BTreeMap<String, usize> = BTreeMap::new();
		for doc in docs {
			let distinct: BTreeSet<String> = tokenizer.tokens(doc.as_ref()).into_iter().collect();
			for term in distinct { *df.entry(term).or_insert(0) += 1; }
		}
		if df.is_empty() { return Err(Error::EmptyVocabulary); }

		let n = docs.len() as f64;
		let mut vocabulary = BTreeMap::new();
		let mut idf = Vec::with_capacity(df.len());
		for (column, (term, count)) in df.into_iter().enumerate() {
			idf.push((((1.0 + n) / (1.0 + count as f64)).ln() + 1.0) as f32);
			vocabulary.insert(term, column);
		}
		Ok(Self { num_docs: docs.len(), vocabulary, idf, tokenizer })
	}

	pub fn transform(&self, text: &str) -> SparseVector {
		let mut counts: HashMap<usize, f32> = HashMap::new();
		for token in self.tokenizer.tokens(text) {
			if let Some(&column) = self.vocabulary.get(&token) { *counts.entry(column).or_insert(0.0) += 1.0; }
		}
		let entries = counts.into_iter().map(|(column, tf)| (column, tf * self.idf[column])).collect();
		SparseVector::from_entries(entries).normalized()
	}

	pub fn num_docs(&self) -> usize { self.num_docs }

	pub fn vocabulary_len(&self) -> usize { self.vocabulary.len() }

	pub fn column(&self, term: &str) -> Option<usize> { self.vocabulary.get(term).copied() }

	pub fn idf(&self, term: &str) -> Option<f32> { self.column(term).map(|c| self.idf[c]) }

	/// Checks that a deserialized model is internally consistent.
	pub fn check(&self) -> std::result::Result<(), String> {
		if self.idf.len() != self.vocabulary.len() {
			return Err(format!("vocabulary has {} terms but {} idf weights", self.vocabulary.len(), self.idf.len()));
		}
		if let Some((term, &column)) = self.vocabulary.iter().find(|(_, c)| **c >= self.idf.len()) {
			return Err(format!("term {:?} maps to out-of-range column {}", term, column));
		}
		if self.num_docs == 0 { return Err("model was fitted on zero documents".to_string()); }
		Ok(())
	}
}

impl TextEncoder for TfidfModel {
	fn dim(&self) -> usize { self.vocabulary.len() }
	fn encode(&self, text: &str) -> SparseVector { self.transform(text) }
}
