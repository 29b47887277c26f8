//! qabot-text
//!
//! TF-IDF question index: tokenizer, term weighting, cosine ranking and the
//! persisted artifact that keeps model and records together.

pub mod artifact;
pub mod index;
pub mod similarity;
pub mod tfidf;
pub mod tokenizer;

pub use artifact::ModelArtifact;
pub use index::QaIndex;
pub use tfidf::TfidfModel;
