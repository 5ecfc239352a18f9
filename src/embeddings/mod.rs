pub mod embedding;
pub mod model;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbedderError {
    #[error("RequestError: {0}")]
    RequestError(String),
    #[error("ParseError: {0}")]
    ParseError(String),
    #[error("Provider error: {0}")]
    ProviderError(String),
    #[error("Environment variable `{0}` is not set")]
    MissingApiKey(String),
}
