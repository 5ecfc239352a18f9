use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::embeddings::{model::EmbeddingModel, EmbedderError};

const API_KEY_ENV_VAR: &str = "ASKDOCS_OPENAI_API_KEY";
const URL: &str = "https://api.openai.com/v1/embeddings";

/// Embedding client for OpenAI and OpenAI-compatible endpoints.
pub struct OpenAIEmbeddingModel {
    api_url: String,
    api_key: String,
    client: reqwest::Client,
    model: String,
}

impl OpenAIEmbeddingModel {
    /// Reads the API key from `ASKDOCS_OPENAI_API_KEY`.
    pub fn new(model: impl Into<String>) -> Result<Self, EmbedderError> {
        let api_key = std::env::var(API_KEY_ENV_VAR)
            .map_err(|_| EmbedderError::MissingApiKey(API_KEY_ENV_VAR.to_string()))?;
        Ok(Self {
            api_url: URL.to_string(),
            api_key,
            client: reqwest::Client::new(),
            model: model.into(),
        })
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

#[derive(Deserialize)]
struct OpenAIEmbeddingResponse {
    pub data: Vec<OpenAIEmbeddingData>,
}

#[derive(Deserialize)]
struct OpenAIEmbeddingData {
    pub embedding: Vec<f64>,
}

#[async_trait]
impl EmbeddingModel for OpenAIEmbeddingModel {
    async fn embed(&self, data: &str) -> Result<Vec<f64>, EmbedderError> {
        let request_body = json!({
            "input": data,
            "model": self.model,
        });
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| EmbedderError::RequestError(e.to_string()))?;

        if response.status().is_success() {
            let response = response
                .json::<OpenAIEmbeddingResponse>()
                .await
                .map_err(|e| EmbedderError::ParseError(e.to_string()))?;

            Ok(response
                .data
                .into_iter()
                .flat_map(|d| d.embedding)
                .collect())
        } else {
            let error_message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            Err(EmbedderError::ProviderError(error_message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore]
    async fn simple_openai_embed_request() {
        let model = OpenAIEmbeddingModel::new("text-embedding-3-small").unwrap();
        let response = model.embed("test").await;
        assert!(response.is_ok());
    }
}
