use async_trait::async_trait;

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};

/// A single tool that the model can request.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use nexus::tools::Tool;
/// use nexus::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Tool for Echo {
///     fn name(&self) -> &str {
///         "search"
///     }
///
///     fn spec(&self) -> ToolSpec {
///         ToolSpec {
///             name: "search".to_string(),
///             description: Some("Echoes the query".to_string()),
///             input_schema: serde_json::json!({"type": "object"}),
///         }
///     }
///
///     async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
///         Ok(ToolCallContent { text: args.to_string() })
///     }
/// }
/// ```
///
/// # Interaction
///
/// - [`ChatOpenAI`](crate::llm::ChatOpenAI) binds `spec()` so the model can emit calls.
/// - [`ActNode`](crate::ActNode) calls `call()` with the arguments of the first pending call
///   and turns any error into text.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model uses to request this tool.
    fn name(&self) -> &str;

    /// Description and JSON schema sent to the model.
    fn spec(&self) -> ToolSpec;

    /// Executes the tool with the given JSON arguments.
    async fn call(&self, args: serde_json::Value) -> Result<ToolCallContent, ToolSourceError>;
}
