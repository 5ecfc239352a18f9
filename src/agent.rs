//! The tool-calling agent loop.
//!
//! One `run` drives a bounded reason/act cycle: the model sees the full
//! history, may request tool calls, the observations are fed back, and the
//! loop ends on the first plain assistant reply. Exhausting the iteration
//! budget is an error, not a partial answer.

use thiserror::Error;
use tracing::{debug, info};

use crate::completion::{CompletionError, CompletionModel, Message, MessageHistory, TokenUsage};
use crate::tools::{ToolSet, ToolSetError};

const DEFAULT_MAX_ITERATIONS: usize = 4;
const DEFAULT_TEMPERATURE: f64 = 1.0;
const DEFAULT_MAX_TOKENS: usize = 2400;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error(transparent)]
    ToolSet(#[from] ToolSetError),
    #[error("No final answer after {0} iterations")]
    MaxIterationsReached(usize),
}

/// An LLM-driven control loop that can invoke tools to answer a question.
pub struct Agent<M: CompletionModel> {
    model: M,
    tools: ToolSet,
    history: MessageHistory,
    max_iterations: usize,
    verbose: bool,
    temperature: f64,
    max_tokens: usize,
    token_usage: TokenUsage,
}

impl<M: CompletionModel> Agent<M> {
    pub fn new(model: M, tools: ToolSet, preamble: impl Into<String>) -> Self {
        Self {
            model,
            tools,
            history: vec![Message::Preamble(preamble.into())],
            max_iterations: DEFAULT_MAX_ITERATIONS,
            verbose: false,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            token_usage: TokenUsage::default(),
        }
    }

    #[must_use]
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Log each reasoning step and tool call at info level.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn token_usage(&self) -> &TokenUsage {
        &self.token_usage
    }

    /// Answers `question`, calling tools as the model requests them.
    pub async fn run(&mut self, question: &str) -> Result<String, AgentError> {
        self.history.push(Message::User {
            content: question.to_string(),
            tool_responses: None,
        });

        for iteration in 0..self.max_iterations {
            let tools = (!self.tools.is_empty()).then_some(&self.tools);
            let (response, usage) = self
                .model
                .send(&self.history, tools, self.temperature, self.max_tokens)
                .await?;
            self.token_usage.accumulate(&usage);
            self.history.push(response.clone());

            let (content, tool_calls) = match response {
                Message::Assistant {
                    content,
                    tool_calls,
                } => (content, tool_calls),
                other => {
                    debug!(?other, "Ignoring non-assistant reply");
                    continue;
                }
            };

            let Some(calls) = tool_calls else {
                if self.verbose {
                    info!(iteration, "Agent produced a final answer");
                }
                return Ok(content);
            };

            let mut responses = Vec::with_capacity(calls.len());
            for call in &calls {
                if self.verbose {
                    info!(iteration, tool = %call.name, args = %call.arguments, "Executing tool call");
                }
                responses.push(self.tools.call(&call.id, &call.name, &call.arguments).await?);
            }
            self.history.push(Message::User {
                content: String::new(),
                tool_responses: Some(responses),
            });
        }

        Err(AgentError::MaxIterationsReached(self.max_iterations))
    }
}
