//! LLM client abstraction for the reasoning step.
//!
//! [`ThinkNode`](crate::ThinkNode) depends on a callable that returns assistant text and
//! optional tool calls; this module defines the trait, an OpenAI-compatible client and a
//! scripted mock.

mod mock;
mod openai;

pub use mock::{MockLlm, MockTurn};
pub use openai::{ChatOpenAI, DEFAULT_GROQ_BASE_URL, DEFAULT_GROQ_MODEL};

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;
use crate::state::ToolCall;

/// Token usage for one LLM call (prompt + completion).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl LlmUsage {
    /// Field-wise sum.
    pub fn add(&self, other: &LlmUsage) -> LlmUsage {
        LlmUsage {
            prompt_tokens: self.prompt_tokens + other.prompt_tokens,
            completion_tokens: self.completion_tokens + other.completion_tokens,
            total_tokens: self.total_tokens + other.total_tokens,
        }
    }
}

/// Response from an LLM completion: assistant text and optional tool calls.
///
/// **Interaction**: Returned by [`LlmClient::invoke`]; ThinkNode turns it into one AI message
/// with [`LlmResponse::into_message`].
#[derive(Clone, Debug, Default)]
pub struct LlmResponse {
    /// Assistant message content (plain text, may be empty when tools are requested).
    pub content: String,
    /// Tool calls from this turn; empty means the reply is final.
    pub tool_calls: Vec<ToolCall>,
    /// Token usage for this call, when the provider reports it.
    pub usage: Option<LlmUsage>,
}

impl LlmResponse {
    pub fn into_message(self) -> Message {
        Message::ai_with_tool_calls(self.content, self.tool_calls)
    }
}

/// LLM client: given the whole conversation, returns the next assistant turn.
///
/// Implementations: [`ChatOpenAI`] (any OpenAI-compatible endpoint, Groq by default) and
/// [`MockLlm`] (scripted turns).
///
/// Errors must distinguish rate limiting ([`AgentError::RateLimited`]) from every other
/// failure ([`AgentError::ExecutionFailed`]); the request boundary relies on it.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one turn over the full ordered history.
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;
}
