use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};

use crate::completion::{
    CompletionError, CompletionModel, Message, MessageHistory, TokenUsage,
};
use crate::tools::{ToolCall, ToolSet};

const API_KEY_ENV_VAR: &str = "ASKDOCS_OPENAI_API_KEY";
const URL: &str = "https://api.openai.com/v1/chat/completions";

/// Chat-completion client for OpenAI and OpenAI-compatible endpoints.
pub struct OpenAICompletionModel {
    api_key: String,
    api_url: String,
    client: reqwest::Client,
    model: String,
}

impl OpenAICompletionModel {
    /// Reads the API key from `ASKDOCS_OPENAI_API_KEY`.
    pub fn new(model: impl Into<String>) -> Result<Self, CompletionError> {
        let api_key = std::env::var(API_KEY_ENV_VAR)
            .map_err(|_| CompletionError::MissingApiKey(API_KEY_ENV_VAR.to_string()))?;
        Ok(Self {
            api_key,
            api_url: URL.to_string(),
            client: reqwest::Client::new(),
            model: model.into(),
        })
    }

    /// Points the client at a different OpenAI-compatible endpoint.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

/// Expands one history entry into its wire-format messages. A user message
/// carrying tool responses becomes one `tool` message per response.
fn wire_messages(message: &Message) -> Vec<Value> {
    match message {
        Message::Preamble(content) => vec![json!({"role": "system", "content": content})],
        Message::User {
            content,
            tool_responses: None,
        } => vec![json!({"role": "user", "content": content})],
        Message::User {
            content,
            tool_responses: Some(responses),
        } => {
            let mut messages: Vec<Value> = responses
                .iter()
                .map(|r| {
                    json!({
                        "role": "tool",
                        "tool_call_id": r.id,
                        "content": r.content.to_string(),
                    })
                })
                .collect();
            if !content.is_empty() {
                messages.push(json!({"role": "user", "content": content}));
            }
            messages
        }
        Message::Assistant {
            content,
            tool_calls,
        } => {
            let mut message = json!({"role": "assistant", "content": content});
            if let Some(calls) = tool_calls {
                let serialized: Vec<Value> = calls
                    .iter()
                    .map(|c| {
                        json!({
                            "id": c.id,
                            "type": "function",
                            "function": {"name": c.name, "arguments": c.arguments},
                        })
                    })
                    .collect();
                if let Some(obj) = message.as_object_mut() {
                    obj.insert("tool_calls".to_string(), Value::Array(serialized));
                }
            }
            vec![message]
        }
    }
}

fn parse_tool_calls(message: &Value) -> Result<Option<Vec<ToolCall>>, CompletionError> {
    let Some(calls) = message["tool_calls"].as_array().filter(|c| !c.is_empty()) else {
        return Ok(None);
    };
    let parse_error =
        || CompletionError::ParseError("Malformed tool call in response".to_string());
    let calls = calls
        .iter()
        .map(|tc| {
            Ok(ToolCall {
                id: tc["id"].as_str().ok_or_else(parse_error)?.to_string(),
                name: tc["function"]["name"]
                    .as_str()
                    .ok_or_else(parse_error)?
                    .to_string(),
                arguments: tc["function"]["arguments"]
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| tc["function"]["arguments"].to_string()),
            })
        })
        .collect::<Result<Vec<_>, CompletionError>>()?;
    info!(tool_call_count = calls.len(), "Parsed tool calls");
    Ok(Some(calls))
}

#[async_trait]
impl CompletionModel for OpenAICompletionModel {
    #[instrument(
        skip(self, history, tools, temperature),
        fields(
            history_len = history.len(),
            tools = tools.is_some())
    )]
    async fn send(
        &self,
        history: &MessageHistory,
        tools: Option<&ToolSet>,
        temperature: f64,
        max_tokens: usize,
    ) -> Result<(Message, TokenUsage), CompletionError> {
        let messages: Vec<Value> = history.iter().flat_map(wire_messages).collect();

        let mut request_body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": temperature,
            "max_tokens": max_tokens,
        });

        if let Some(tools) = tools {
            let tools_serialized: Vec<Value> =
                tools.0.iter().map(|t| t.default_serializer()).collect();
            if let Some(obj) = request_body.as_object_mut() {
                info!(
                    tool_count = tools_serialized.len(),
                    "Including tools in request"
                );
                obj.insert("tools".to_string(), Value::Array(tools_serialized));
            }
        }

        debug!(request_body = ?request_body, "Sending completion request");

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Request failed");
                CompletionError::RequestError(e.to_string())
            })?;

        let status = response.status();
        debug!(%status, "Received API response");

        if !status.is_success() {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error (failed to read response body)".to_string());
            error!(
                status = %status,
                error = %error_msg,
                "API returned error response"
            );
            return Err(CompletionError::ProviderError(status.into(), error_msg));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse response JSON");
            CompletionError::ParseError(e.to_string())
        })?;

        let message_json = &response_json["choices"][0]["message"];
        let content = match &message_json["content"] {
            Value::Null => String::new(),
            v => v
                .as_str()
                .ok_or_else(|| CompletionError::ParseError("Invalid response body".to_string()))?
                .to_string(),
        };
        let tool_calls = parse_tool_calls(message_json)?;

        let usage = &response_json["usage"];
        let token_usage = TokenUsage {
            prompt_tokens: usage["prompt_tokens"].as_u64(),
            completion_tokens: usage["completion_tokens"].as_u64(),
            total_tokens: usage["total_tokens"].as_u64(),
        };
        info!(
            prompt_tokens = token_usage.prompt_tokens,
            completion_tokens = token_usage.completion_tokens,
            total_tokens = token_usage.total_tokens,
            "Token usage recorded"
        );

        Ok((
            Message::Assistant {
                content,
                tool_calls,
            },
            token_usage,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolResponse;

    #[test]
    fn preamble_becomes_a_system_message() {
        let wire = wire_messages(&Message::Preamble("be helpful".into()));
        assert_eq!(wire, vec![json!({"role": "system", "content": "be helpful"})]);
    }

    #[test]
    fn tool_responses_become_tool_messages() {
        let wire = wire_messages(&Message::User {
            content: String::new(),
            tool_responses: Some(vec![ToolResponse {
                id: "call_0".into(),
                name: "retriever".into(),
                content: Value::from("found it"),
            }]),
        });
        assert_eq!(wire.len(), 1);
        assert_eq!(wire[0]["role"], "tool");
        assert_eq!(wire[0]["tool_call_id"], "call_0");
    }

    #[test]
    fn assistant_tool_calls_round_trip_to_wire_format() {
        let wire = wire_messages(&Message::Assistant {
            content: String::new(),
            tool_calls: Some(vec![ToolCall {
                id: "call_0".into(),
                name: "retriever".into(),
                arguments: r#"{"query":"x"}"#.into(),
            }]),
        });
        assert_eq!(wire[0]["tool_calls"][0]["function"]["name"], "retriever");
    }

    #[test]
    fn tool_calls_parse_from_a_response_message() {
        let message = json!({
            "content": null,
            "tool_calls": [{
                "id": "call_9",
                "function": {"name": "retriever", "arguments": "{\"query\":\"hi\"}"}
            }]
        });
        let calls = parse_tool_calls(&message).unwrap().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "retriever");
        assert_eq!(calls[0].arguments, "{\"query\":\"hi\"}");
    }

    #[test]
    fn absent_tool_calls_parse_to_none() {
        let message = json!({"content": "plain answer"});
        assert_eq!(parse_tool_calls(&message).unwrap(), None);
    }

    #[tokio::test]
    #[ignore]
    async fn simple_openai_completion_request() {
        let model = OpenAICompletionModel::new("gpt-4o-mini").unwrap();
        let history = vec![Message::User {
            content: r#"
This is a test from a software library that uses this LLM assistant.
For this test to be considered successful, reply with "okay" without the quotes, and NOTHING else.
"#
            .to_string(),
            tool_responses: None,
        }];

        let response = model.send(&history, None, 0.0, 10).await;

        assert!(response.clone().is_ok_and(|v| v.0
            == Message::Assistant {
                content: "okay".to_string(),
                tool_calls: None
            }));
        assert!(response.is_ok_and(|v| matches!(
            v.1,
            TokenUsage {
                total_tokens: Some(_),
                ..
            }
        )));
    }
}
