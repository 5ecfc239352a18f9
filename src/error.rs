use crate::{
    agent::AgentError, completion::CompletionError, convert::ConvertError,
    embeddings::EmbedderError, loader::LoaderError, tools::ToolSetError,
    vector_store::VectorStoreError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Loader error")]
    Loader(#[from] LoaderError),
    #[error("Conversion error")]
    Convert(#[from] ConvertError),
    #[error("Embedder error")]
    Embedder(#[from] EmbedderError),
    #[error("VectorStore error")]
    VectorStore(#[from] VectorStoreError),
    #[error("ToolSet error")]
    ToolSet(#[from] ToolSetError),
    #[error("Completion error")]
    Completion(#[from] CompletionError),
    #[error("Agent error")]
    Agent(#[from] AgentError),
}
