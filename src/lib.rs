//! # askdocs
//!
//! Agentic question answering over a folder of local documents.
//!
//! The pipeline is a single pass: load the regular files in a directory,
//! convert each one into `(title, markdown text)`, split the text into
//! overlapping chunks, embed the chunks once into an in-memory index, and
//! hand that index to a tool-calling agent that answers one question.
//!
//! Each stage sits behind a narrow trait so any concrete implementation can
//! be substituted without touching the wiring:
//!
//! - [`convert::MarkdownConvert`]: `convert(path) -> (title, text)`
//! - [`splitter::RecursiveSplitter`]: documents -> chunks
//! - [`embeddings::model::EmbeddingModel`] + [`vector_store::VectorStore`]:
//!   chunk indexing and similarity search
//! - [`tools::Tool`]: capabilities the agent may invoke
//! - [`completion::CompletionModel`]: the LLM provider
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use askdocs::agent::Agent;
//! use askdocs::convert::BuiltinConverter;
//! use askdocs::loader::load_documents;
//! use askdocs::providers::completions::OpenAICompletionModel;
//! use askdocs::providers::embeddings::OpenAIEmbeddingModel;
//! use askdocs::retriever::{Retriever, RetrieverTool};
//! use askdocs::splitter::RecursiveSplitter;
//! use askdocs::tools::ToolSet;
//! use askdocs::vector_store::InMemoryVectorStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), askdocs::Error> {
//!     let documents = load_documents(Path::new("./docs"), &BuiltinConverter)?;
//!     let chunks = RecursiveSplitter::default().split_documents(&documents);
//!
//!     let retriever = Retriever::build(
//!         chunks,
//!         OpenAIEmbeddingModel::new("text-embedding-3-small")?,
//!         InMemoryVectorStore::new(),
//!     )
//!     .await?;
//!     let tools = ToolSet(vec![Box::new(RetrieverTool::new(retriever))]);
//!
//!     let mut agent = Agent::new(
//!         OpenAICompletionModel::new("gpt-4o-mini")?,
//!         tools,
//!         "Answer using the retriever tool.",
//!     )
//!     .verbose(true);
//!
//!     let answer = agent.run("What is my name?").await?;
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```
//!
//! ## Feature flags
//!
//! Name | Description | Default?
//! ---|---|---
//! `pdf` | enables the builtin converter to parse PDFs | No

/// The bounded tool-calling agent loop
pub mod agent;

/// Completion messages, token accounting, and the provider seam
pub mod completion;

/// File-to-markdown conversion
pub mod convert;

/// Document and chunk value types
pub mod document;

/// Text embeddings support
pub mod embeddings;

/// Error types for all library operations
pub mod error;

/// Directory listing and document building
pub mod loader;

/// Builtin completion and embedding model providers
pub mod providers;

/// Chunk indexing and the retrieval tool
pub mod retriever;

/// Recursive character splitting
pub mod splitter;

/// Function calling and tool execution support
pub mod tools;

/// Vector storage and retrieval
pub mod vector_store;

pub use error::Error;
