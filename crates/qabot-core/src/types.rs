//! Domain types shared by the indexer and the responder.

use serde::{Deserialize, Serialize};

/// Position of a record within the corpus.
pub type RecordIndex = usize;

/// One question/answer pair. Unknown fields are rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QaRecord {
    pub question: String,
    pub answer: String,
}

impl QaRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self { question: question.into(), answer: answer.into() }
    }
}

/// Sparse term-weight vector: `(column, weight)` pairs sorted by column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    /// Builds a vector from unordered entries, merging duplicate columns and
    /// dropping zero weights.
    pub fn from_entries(mut entries: Vec<(usize, f32)>) -> Self {
        entries.sort_by_key(|(col, _)| *col);
        let mut merged: Vec<(usize, f32)> = Vec::with_capacity(entries.len());
        for (col, w) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == col => *acc += w,
                _ => merged.push((col, w)),
            }
        }
        merged.retain(|(_, w)| *w != 0.0);
        Self { entries: merged }
    }

    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Scales to unit length; the zero vector stays zero.
    pub fn normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries { *w /= norm; }
        }
        self
    }

    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j, mut acc) = (0, 0, 0.0f32);
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        acc
    }
}

/// A ranked candidate. `index` matches the record position in the corpus and
/// `score` is the cosine similarity (higher is better).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub index: RecordIndex,
    pub score: f32,
}
