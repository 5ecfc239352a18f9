use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{cosine_similarity, VectorStore, VectorStoreError};
use crate::embeddings::embedding::Embedding;

/// Embedding store held entirely in memory, ranked by cosine similarity.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    embeddings: RwLock<HashMap<String, Embedding>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn store(&self, embedding: Embedding) -> Result<(), VectorStoreError> {
        let mut embeddings = self.embeddings.write().await;
        embeddings.insert(embedding.id.clone(), embedding);
        Ok(())
    }

    async fn top_n(&self, query: &[f64], n: usize) -> Result<Vec<Embedding>, VectorStoreError> {
        let embeddings = self.embeddings.read().await;
        let mut results = embeddings
            .values()
            .map(|embedding| {
                let score = cosine_similarity(query, &embedding.embedded_data);
                (score, embedding.clone())
            })
            .collect::<Vec<_>>();
        results.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(n);
        Ok(results.into_iter().map(|(_, em)| em).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedding(id: &str, text: &str, vector: Vec<f64>) -> Embedding {
        Embedding {
            id: id.to_string(),
            raw_data: text.to_string(),
            embedded_data: vector,
        }
    }

    #[tokio::test]
    async fn store_inserts_and_overwrites() {
        let store = InMemoryVectorStore::new();

        store
            .store(embedding("id", "hello world", vec![1.0, 2.0, 3.0]))
            .await
            .unwrap();
        store
            .store(embedding("id", "shalom world", vec![4.0, 5.0, 6.0]))
            .await
            .unwrap();

        let results = store.top_n(&[4.0, 5.0, 6.0], 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].raw_data, "shalom world");
    }

    #[tokio::test]
    async fn top_n_ranks_by_similarity() {
        let store = InMemoryVectorStore::new();
        store
            .store(embedding("id1", "hello world", vec![1.0, 0.0, 0.0]))
            .await
            .unwrap();
        store
            .store(embedding("id2", "shalom world", vec![0.9, 0.1, 0.0]))
            .await
            .unwrap();
        store
            .store(embedding("id3", "selam world", vec![0.0, 0.0, 1.0]))
            .await
            .unwrap();

        let query = vec![1.0, 0.0, 0.0];
        let top = store.top_n(&query, 2).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, "id1");
        assert_eq!(top[1].id, "id2");
    }

    #[tokio::test]
    async fn top_n_on_empty_store_is_empty() {
        let store = InMemoryVectorStore::new();
        let top = store.top_n(&[1.0, 2.0], 5).await.unwrap();
        assert!(top.is_empty());
    }
}
