//! Node trait: one step of the loop.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;
use crate::state::ConversationState;

/// One step of the research loop (reason or act).
///
/// Reads the current conversation and returns the messages to append, in order. A node never
/// mutates the state itself; returning an empty vector means "nothing to add".
///
/// **Interaction**: Implemented by [`ThinkNode`](crate::ThinkNode) and
/// [`ActNode`](crate::ActNode); driven by [`ResearchAgent`](crate::ResearchAgent).
#[async_trait]
pub trait Node: Send + Sync {
    /// Node id used in logs (e.g. "think", "act").
    fn id(&self) -> &str;

    /// Runs one step over `state` and returns the update.
    async fn run(&self, state: &ConversationState) -> Result<Vec<Message>, AgentError>;
}
