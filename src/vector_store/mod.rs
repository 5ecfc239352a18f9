pub mod in_memory;

pub use in_memory::InMemoryVectorStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::embeddings::embedding::Embedding;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VectorStoreError {
    #[error("embedding `{0}` not found")]
    EmbeddingNotFound(String),
    #[error("store rejected the embedding: {0}")]
    StoreRejected(String),
}

#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn store(&self, embedding: Embedding) -> Result<(), VectorStoreError>;

    /// The `n` stored embeddings most similar to `query`, best first.
    async fn top_n(&self, query: &[f64], n: usize) -> Result<Vec<Embedding>, VectorStoreError>;
}

pub(crate) fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
