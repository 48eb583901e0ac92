//! Think node: read messages, call LLM, append one AI message (optionally with tool calls).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::llm::{LlmClient, LlmUsage};
use crate::message::Message;
use crate::state::ConversationState;

/// Think node: the reasoning step.
///
/// Sends the whole conversation to the LLM and turns the reply into one AI message. LLM errors
/// are passed through unchanged so the caller can tell rate limiting from other faults.
///
/// **Interaction**: Implements [`Node`]; driven by [`ResearchAgent`](crate::ResearchAgent),
/// which also uses [`ThinkNode::reason`] to collect token usage.
pub struct ThinkNode {
    llm: Arc<dyn LlmClient>,
    timeout: Option<Duration>,
}

impl ThinkNode {
    /// Creates a Think node with the given LLM client.
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm, timeout: None }
    }

    /// Fails the step with [`AgentError::Timeout`] when the LLM takes longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// One reasoning step: the AI message to append plus the usage the provider reported.
    pub async fn reason(
        &self,
        state: &ConversationState,
    ) -> Result<(Message, Option<LlmUsage>), AgentError> {
        let call = self.llm.invoke(state.messages());
        let response = match self.timeout {
            Some(after) => tokio::time::timeout(after, call).await.map_err(|_| {
                AgentError::Timeout {
                    step: self.id().to_string(),
                    after,
                }
            })??,
            None => call.await?,
        };
        if let Some(ref u) = response.usage {
            tracing::debug!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "LLM usage"
            );
        }
        tracing::debug!(
            content_len = response.content.len(),
            tool_calls = response.tool_calls.len(),
            "LLM replied"
        );
        let usage = response.usage.clone();
        Ok((response.into_message(), usage))
    }
}

#[async_trait]
impl Node for ThinkNode {
    fn id(&self) -> &str {
        "think"
    }

    async fn run(&self, state: &ConversationState) -> Result<Vec<Message>, AgentError> {
        let (message, _) = self.reason(state).await?;
        Ok(vec![message])
    }
}
