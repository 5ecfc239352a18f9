//! The completion-provider seam.

use async_trait::async_trait;
use thiserror::Error;

use crate::tools::{ToolCall, ToolResponse, ToolSet};

/// Message that'll be sent in completions.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// System prompt
    Preamble(String),
    /// Message sent by the user
    User {
        content: String,
        tool_responses: Option<Vec<ToolResponse>>,
    },
    /// Response from the assistant
    Assistant {
        content: String,
        tool_calls: Option<Vec<ToolCall>>,
    },
}

pub type MessageHistory = Vec<Message>;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

impl TokenUsage {
    pub fn accumulate(&mut self, usage: &Self) {
        self.prompt_tokens = combine_options(self.prompt_tokens, usage.prompt_tokens);
        self.completion_tokens = combine_options(self.completion_tokens, usage.completion_tokens);
        self.total_tokens = combine_options(self.total_tokens, usage.total_tokens);
    }
}

#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("Provider error -> HTTP Status {0}: {1}")]
    ProviderError(u16, String),
    #[error("RequestError: {0}")]
    RequestError(String),
    #[error("ParseError: {0}")]
    ParseError(String),
    #[error("Environment variable `{0}` is not set")]
    MissingApiKey(String),
}

/// A model that can complete a conversation, optionally calling tools.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Sends the full message history to the model and returns its reply.
    async fn send(
        &self,
        history: &MessageHistory,
        tools: Option<&ToolSet>,
        temperature: f64,
        max_tokens: usize,
    ) -> Result<(Message, TokenUsage), CompletionError>;
}

fn combine_options(a: Option<u64>, b: Option<u64>) -> Option<u64> {
    match (a, b) {
        (Some(a_val), Some(b_val)) => Some(a_val + b_val),
        _ => None,
    }
}
