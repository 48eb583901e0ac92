//! Tool call requested by the model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the only tool this agent binds.
pub const SEARCH_TOOL_NAME: &str = "search";

/// A single tool invocation produced by the reasoning step and consumed by the act node.
///
/// `id` is assigned by the model provider and copied into the answering tool message.
/// `arguments` is already parsed into an object, e.g. `{"query": "gold price today"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// A `search` call with a single `query` argument.
    pub fn search(id: impl Into<String>, query: impl Into<String>) -> Self {
        let mut arguments = Map::new();
        arguments.insert("query".to_string(), Value::String(query.into()));
        Self::new(id, SEARCH_TOOL_NAME, arguments)
    }

    /// Parses provider-supplied JSON text into an argument object.
    ///
    /// Empty text is an empty object. A JSON string holding an object (double-encoded
    /// arguments) is unwrapped once. Anything else that is not an object yields an empty
    /// object; the tool then reports the missing argument as text.
    pub fn parse_arguments(raw: &str) -> Map<String, Value> {
        if raw.trim().is_empty() {
            return Map::new();
        }
        let value: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, arguments = %raw, "tool arguments JSON parse failed, using empty object");
                return Map::new();
            }
        };
        match value {
            Value::Object(map) => map,
            Value::String(inner) => match serde_json::from_str::<Value>(&inner) {
                Ok(Value::Object(map)) => map,
                _ => {
                    tracing::warn!(arguments = %raw, "nested tool arguments are not an object");
                    Map::new()
                }
            },
            other => {
                tracing::warn!(arguments = %other, "tool arguments are not an object");
                Map::new()
            }
        }
    }

    pub fn arguments_value(&self) -> Value {
        Value::Object(self.arguments.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_builds_query_argument() {
        let call = ToolCall::search("c1", "gold price today");
        assert_eq!(call.name, "search");
        assert_eq!(call.arguments_value(), json!({"query": "gold price today"}));
    }

    #[test]
    fn parse_arguments_accepts_object() {
        let m = ToolCall::parse_arguments(r#"{"query":"rust"}"#);
        assert_eq!(m.get("query"), Some(&json!("rust")));
    }

    #[test]
    fn parse_arguments_unwraps_double_encoded_object() {
        let m = ToolCall::parse_arguments(r#""{\"query\":\"rust\"}""#);
        assert_eq!(m.get("query"), Some(&json!("rust")));
    }

    #[test]
    fn parse_arguments_falls_back_to_empty_object() {
        assert!(ToolCall::parse_arguments("").is_empty());
        assert!(ToolCall::parse_arguments("not json").is_empty());
        assert!(ToolCall::parse_arguments("[1,2]").is_empty());
    }
}
