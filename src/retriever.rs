//! Chunk retrieval.
//!
//! [`Retriever`] embeds every chunk once at construction and answers
//! free-text queries with the most similar chunk contents.
//! [`RetrieverTool`] exposes that capability to the agent through the
//! [`Tool`] trait.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::document::Chunk;
use crate::embeddings::embedding::Embedding;
use crate::embeddings::model::EmbeddingModel;
use crate::error::Error;
use crate::tools::{Tool, ToolArg, ToolError};
use crate::vector_store::VectorStore;

const DEFAULT_TOP_K: usize = 3;

/// Read-only similarity index over a fixed set of chunks.
pub struct Retriever<M: EmbeddingModel, V: VectorStore> {
    model: M,
    store: V,
    top_k: usize,
    chunk_count: usize,
}

impl<M: EmbeddingModel, V: VectorStore> Retriever<M, V> {
    /// Embeds every chunk and indexes it. The index is built once; there
    /// is no incremental update path.
    pub async fn build(chunks: Vec<Chunk>, model: M, store: V) -> Result<Self, Error> {
        let chunk_count = chunks.len();
        for (idx, chunk) in chunks.into_iter().enumerate() {
            let embedded_data = model.embed(&chunk.content).await?;
            store
                .store(Embedding {
                    id: format!("{}#{idx}", chunk.metadata.source),
                    embedded_data,
                    raw_data: chunk.content,
                })
                .await?;
        }
        debug!(chunk_count, "Retrieval index built");
        Ok(Self {
            model,
            store,
            top_k: DEFAULT_TOP_K,
            chunk_count,
        })
    }

    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// The top-K most relevant chunk contents, most relevant first.
    ///
    /// An empty index returns an empty list for any query, without ever
    /// calling the embedding model.
    pub async fn search(&self, query: &str) -> Result<Vec<String>, Error> {
        if self.chunk_count == 0 {
            return Ok(Vec::new());
        }
        let embedded_query = self.model.embed(query).await?;
        let matches = self.store.top_n(&embedded_query, self.top_k).await?;
        Ok(matches.into_iter().map(|m| m.raw_data).collect())
    }
}

/// The retrieval capability, packaged for the agent.
pub struct RetrieverTool<M: EmbeddingModel, V: VectorStore> {
    retriever: Retriever<M, V>,
    args: Vec<ToolArg>,
}

impl<M: EmbeddingModel, V: VectorStore> RetrieverTool<M, V> {
    pub fn new(retriever: Retriever<M, V>) -> Self {
        Self {
            retriever,
            args: vec![ToolArg::new::<String>(
                "query",
                "The query to perform. Should be semantically close to the target documents.",
            )],
        }
    }
}

#[async_trait]
impl<M: EmbeddingModel, V: VectorStore> Tool for RetrieverTool<M, V> {
    fn name(&self) -> &str {
        "retriever"
    }

    fn description(&self) -> &str {
        "Uses semantic search to retrieve the parts of the documentation that could be most relevant to answer your query."
    }

    fn args(&self) -> &[ToolArg] {
        &self.args
    }

    async fn call(&self, args: &str) -> Result<Value, ToolError> {
        #[derive(Deserialize)]
        struct Params {
            query: String,
        }
        let params: Params = serde_json::from_str(args)?;
        let results = self
            .retriever
            .search(&params.query)
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

        let mut formatted = String::from("Retrieved documents:");
        for (i, content) in results.iter().enumerate() {
            formatted.push_str(&format!("\n\n===== Document {i} =====\n{content}"));
        }
        Ok(Value::from(formatted))
    }
}
