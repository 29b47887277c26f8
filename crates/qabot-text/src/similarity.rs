use std::cmp::Ordering;

use qabot_core::types::{SearchHit, SparseVector};

/// Cosine of the angle between `a` and `b`; 0 when either side is the zero vector.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f32 {
	if a.is_zero() || b.is_zero() { return 0.0; }
	let denom = a.norm() * b.norm();
	if denom <= f32::EPSILON { return 0.0; }
	(a.dot(b) / denom).clamp(-1.0, 1.0)
}

/// Scores `query` against every corpus vector and keeps the best `k`,
/// highest score first, equal scores in corpus order.
pub fn rank(query: &SparseVector, corpus: &[SparseVector], k: usize) -> Vec<SearchHit> {
	let mut hits: Vec<SearchHit> = corpus
		.iter()
		.enumerate()
		.map(|(index, doc)| SearchHit { index, score: cosine(query, doc) })
		.collect();
	hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal).then(a.index.cmp(&b.index)));
	hits.truncate(k);
	hits
}
