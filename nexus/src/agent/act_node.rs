//! Act node: execute the pending tool call and append its result.
//!
//! Only the first tool call of the latest AI message is executed; any others in the same turn
//! are dropped. Every tool fault (unknown tool, bad arguments, transport, timeout) is caught
//! and written into the tool message as `Error during search: <details>`, so the run continues
//! and the model decides what to do next.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace, warn};

use crate::error::AgentError;
use crate::graph::Node;
use crate::message::Message;
use crate::state::{ConversationState, ToolCall};
use crate::tool_source::{ToolCallContent, ToolSourceError};
use crate::tools::Tool;

/// Prefix of the tool message content when the tool call failed.
pub const SEARCH_ERROR_PREFIX: &str = "Error during search: ";

/// Truncates a string for logging, appending "..." if longer than max_len.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_len).collect::<String>())
    }
}

/// Act node: the tool invoker.
///
/// **Interaction**: Implements [`Node`]; holds the single bound [`Tool`]. Appends exactly one
/// tool message when a call is pending and nothing otherwise.
pub struct ActNode {
    tool: Arc<dyn Tool>,
    timeout: Option<Duration>,
}

impl ActNode {
    pub fn new(tool: Arc<dyn Tool>) -> Self {
        Self {
            tool,
            timeout: None,
        }
    }

    /// Tool calls running longer than `timeout` are reported as a failed search.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn execute(&self, tc: &ToolCall) -> Result<ToolCallContent, ToolSourceError> {
        if tc.name != self.tool.name() {
            return Err(ToolSourceError::NotFound(tc.name.clone()));
        }
        let call = self.tool.call(tc.arguments_value());
        match self.timeout {
            Some(after) => tokio::time::timeout(after, call).await.map_err(|_| {
                ToolSourceError::Transport(format!("timed out after {:?}", after))
            })?,
            None => call.await,
        }
    }
}

#[async_trait]
impl Node for ActNode {
    fn id(&self) -> &str {
        "act"
    }

    async fn run(&self, state: &ConversationState) -> Result<Vec<Message>, AgentError> {
        let Some(tc) = state.pending_tool_call() else {
            debug!("No pending tool call");
            return Ok(vec![]);
        };
        let requested = state.last().map(|m| m.tool_calls().len()).unwrap_or(0);
        if requested > 1 {
            debug!(
                requested,
                executed = %tc.id,
                "Multiple tool calls requested, executing the first only"
            );
        }

        debug!(tool = %tc.name, args = ?tc.arguments, "Calling tool");
        let content = match self.execute(tc).await {
            Ok(content) => {
                trace!(
                    tool = %tc.name,
                    result_len = content.text.len(),
                    result_preview = %truncate_for_log(&content.text, 200),
                    "Tool returned"
                );
                content.text
            }
            Err(e) => {
                warn!(tool = %tc.name, error = %e, "Tool call failed");
                format!("{}{}", SEARCH_ERROR_PREFIX, e)
            }
        };
        Ok(vec![Message::tool_result(tc, content)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_for_log_short_and_long() {
        assert_eq!(truncate_for_log("abc", 5), "abc");
        assert_eq!(truncate_for_log("abcdef", 3), "abc...");
    }
}
