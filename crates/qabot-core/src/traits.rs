use crate::types::{QaRecord, SearchHit, SparseVector};

pub trait TextEncoder: Send + Sync {
    fn dim(&self) -> usize;
    fn encode(&self, text: &str) -> SparseVector;
}

pub trait Retriever: Send + Sync {
    /// Top `k` hits, best first.
    fn rank(&self, query: &str, k: usize) -> Vec<SearchHit>;
    fn record(&self, index: usize) -> Option<&QaRecord>;
}
