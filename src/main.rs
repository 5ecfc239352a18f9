//! One-shot demo: answer a hardcoded question over the files in `./docs`.

use std::path::Path;

use askdocs::agent::Agent;
use askdocs::convert::BuiltinConverter;
use askdocs::loader::load_documents;
use askdocs::providers::completions::OpenAICompletionModel;
use askdocs::providers::embeddings::OpenAIEmbeddingModel;
use askdocs::retriever::{Retriever, RetrieverTool};
use askdocs::splitter::RecursiveSplitter;
use askdocs::tools::ToolSet;
use askdocs::vector_store::InMemoryVectorStore;

const DOCS_DIR: &str = "./docs";
const COMPLETION_MODEL: &str = "gpt-4o-mini";
const EMBEDDING_MODEL: &str = "text-embedding-3-small";
const QUESTION: &str = "What is my name?";
const PREAMBLE: &str = "You are a helpful assistant. Use the retriever tool to look up the \
parts of the documentation relevant to the question before answering.";

#[tokio::main]
async fn main() -> Result<(), askdocs::Error> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    let documents = load_documents(Path::new(DOCS_DIR), &BuiltinConverter)?;
    println!("{documents:#?}");

    let chunks = RecursiveSplitter::default().split_documents(&documents);

    let retriever = Retriever::build(
        chunks,
        OpenAIEmbeddingModel::new(EMBEDDING_MODEL)?,
        InMemoryVectorStore::new(),
    )
    .await?;
    let tools = ToolSet(vec![Box::new(RetrieverTool::new(retriever))]);

    let mut agent = Agent::new(OpenAICompletionModel::new(COMPLETION_MODEL)?, tools, PREAMBLE)
        .max_iterations(4)
        .verbose(true);

    let answer = agent.run(QUESTION).await?;

    println!("Final output:");
    println!("{answer}");
    Ok(())
}
