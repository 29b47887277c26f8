use qabot_core::error::{Error, Result};
use qabot_core::traits::{Retriever, TextEncoder};
use qabot_core::types::{QaRecord, SearchHit, SparseVector};

use crate::similarity::rank;
use crate::tfidf::TfidfModel;

/// Question/answer corpus plus the model fitted on it and the cached question vectors.
///
/// Model and records only ever enter together (fitted here or loaded from one
/// artifact), so corpus vectors are always encoded with the model that scores queries.
#[derive(Debug, Clone)]
pub struct QaIndex {
	model: TfidfModel,
	records: Vec<QaRecord>,
	vectors: Vec<SparseVector>,
}

impl QaIndex {
	/// Fits a fresh model on the questions of `records`.
	///
	/// Every question must keep at least one term after tokenization, otherwise
	/// it could never be matched.
	pub fn build(records: Vec<QaRecord>) -> Result<Self> {
		let questions: Vec<&str> = records.iter().map(|r| r.question.as_str()).collect();
		let model = TfidfModel::fit(&questions)?;
		tracing::debug!(records = records.len(), vocabulary = model.dim(), "fitted tf-idf model");
		let index = Self::from_parts(model, records);
		if let Some(i) = index.vectors.iter().position(SparseVector::is_zero) {
			return Err(Error::InvalidRecord {
				index: i,
				reason: "question has no indexable terms".to_string(),
			});
		}
		Ok(index)
	}

	pub(crate) fn from_parts(model: TfidfModel, records: Vec<QaRecord>) -> Self {
		let vectors = records.iter().map(|r| model.encode(&r.question)).collect();
		Self { model, records, vectors }
	}

	pub fn model(&self) -> &TfidfModel { &self.model }

	pub fn records(&self) -> &[QaRecord] { &self.records }

	/// Best of the top `k` candidates.
	pub fn best_match(&self, query: &str, k: usize) -> Option<SearchHit> {
		self.rank(query, k.max(1)).into_iter().next()
	}
}

impl Retriever for QaIndex {
	fn rank(&self, query: &str, k: usize) -> Vec<SearchHit> {
		let q = self.model.encode(&query.to_lowercase());
		rank(&q, &self.vectors, k)
	}

	fn record(&self, index: usize) -> Option<&QaRecord> { self.records.get(index) }
}
