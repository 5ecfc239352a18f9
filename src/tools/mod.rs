use async_trait::async_trait;
use schemars::{gen::SchemaSettings, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// A capability the agent can invoke by name with JSON arguments.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn args(&self) -> &[ToolArg];

    async fn call(&self, args: &str) -> Result<Value, ToolError>;

    /// Serializes the tool into the provider's function-call format.
    fn default_serializer(&self) -> Value {
        let parameters = build_parameters_schema(self.args());
        json!({
            "type": "function",
            "function": {
                "name": self.name(),
                "strict": true,
                "description": self.description(),
                "parameters": parameters
            }
        })
    }
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to execute the call")]
    ToolCallError(#[from] Box<dyn std::error::Error + Send + Sync>),
    #[error("Json Error")]
    JsonError(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ToolSetError {
    #[error("Failed to find tool `{0}`")]
    ToolNotFound(String),
    #[error("Tool error")]
    ToolError(#[from] ToolError),
}

/// The tools made available to an agent.
pub struct ToolSet(pub Vec<Box<dyn Tool>>);

impl ToolSet {
    pub fn find_tool(&self, name: &str) -> Result<&dyn Tool, ToolSetError> {
        self.0
            .iter()
            .map(AsRef::as_ref)
            .find(|t| t.name() == name)
            .ok_or_else(|| ToolSetError::ToolNotFound(name.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub async fn call(
        &self,
        id: &str,
        name: &str,
        args: &str,
    ) -> Result<ToolResponse, ToolSetError> {
        let tool = self.find_tool(name)?;
        let content = tool.call(args).await?;
        Ok(ToolResponse {
            id: id.to_owned(),
            name: name.to_owned(),
            content,
        })
    }
}

/// One named, described, schema-typed tool argument.
pub struct ToolArg {
    name: String,
    schema: Value,
}

impl ToolArg {
    pub fn new<T: JsonSchema + Serialize>(name: &str, description: &str) -> Self {
        let settings = SchemaSettings::default().with(|s| {
            s.inline_subschemas = true;
        });
        let generator = settings.into_generator();
        let schema = generator.into_root_schema_for::<T>();
        let mut schema_value = serde_json::to_value(&schema).unwrap_or_else(|_| json!({}));

        if let Some(obj) = schema_value.as_object_mut() {
            obj.remove("$schema");
            obj.remove("format");
            obj.remove("title");
            obj.insert("description".to_string(), json!(description));
        }

        ToolArg {
            name: name.to_string(),
            schema: schema_value,
        }
    }
}

/// Represents a tool call requested by the assistant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

/// Represents the output of a tool execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub id: String,
    pub name: String,
    pub content: serde_json::Value,
}

pub fn build_parameters_schema(args: &[ToolArg]) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();

    for arg in args {
        properties.insert(arg.name.clone(), arg.schema.clone());
        required.push(json!(arg.name));
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool {
        args: Vec<ToolArg>,
    }

    impl EchoTool {
        fn new() -> Self {
            Self {
                args: vec![ToolArg::new::<String>("text", "text to echo back")],
            }
        }
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echoes the given text"
        }
        fn args(&self) -> &[ToolArg] {
            &self.args
        }
        async fn call(&self, args: &str) -> Result<Value, ToolError> {
            #[derive(Deserialize)]
            struct Params {
                text: String,
            }
            let params: Params = serde_json::from_str(args)?;
            Ok(Value::from(params.text))
        }
    }

    #[tokio::test]
    async fn toolset_dispatches_by_name() {
        let tools = ToolSet(vec![Box::new(EchoTool::new())]);
        let response = tools
            .call("call_1", "echo", r#"{"text":"hi"}"#)
            .await
            .unwrap();
        assert_eq!(response.id, "call_1");
        assert_eq!(response.content, Value::from("hi"));
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        let tools = ToolSet(vec![Box::new(EchoTool::new())]);
        let result = tools.call("call_1", "missing", "{}").await;
        assert!(matches!(result, Err(ToolSetError::ToolNotFound(_))));
    }

    #[test]
    fn serializer_includes_schema() {
        let tool = EchoTool::new();
        let serialized = tool.default_serializer();
        assert_eq!(serialized["function"]["name"], "echo");
        let required = serialized["function"]["parameters"]["required"]
            .as_array()
            .unwrap();
        assert_eq!(required, &vec![Value::from("text")]);
    }
}
