//! Tool boundary types: what a tool looks like to the model and what a call returns.
//!
//! [`ToolSpec`] is bound to the model client so it can emit tool calls; [`ToolCallContent`] and
//! [`ToolSourceError`] are what [`Tool::call`](crate::tools::Tool::call) returns. The act node
//! turns every `ToolSourceError` into text, so none of these errors ever end a run.

use serde_json::Value;
use thiserror::Error;

use crate::state::SEARCH_TOOL_NAME;

/// Tool specification sent to the model (function name, description, JSON schema).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    /// Tool name; must match [`ToolCall::name`](crate::state::ToolCall::name) for the call to run.
    pub name: String,
    /// Human-readable description for the model.
    pub description: Option<String>,
    /// JSON Schema for arguments.
    pub input_schema: Value,
}

impl ToolSpec {
    /// Spec of the web search tool: one required `query` string.
    pub fn search() -> Self {
        Self {
            name: SEARCH_TOOL_NAME.to_string(),
            description: Some(
                "Search the web for current, real-time information. Returns the top results \
                 with title, URL and a content excerpt."
                    .to_string(),
            ),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Search query." }
                },
                "required": ["query"]
            }),
        }
    }
}

/// Result of a single tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallContent {
    /// Result text placed in the tool message.
    pub text: String,
}

/// Errors from calling a tool.
#[derive(Debug, Error)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
    #[error("transport error: {0}")]
    Transport(String),
}
