//! Research loop: Think, Act, routing and the loop controller.
//!
//! # Main types
//!
//! - **[`ThinkNode`]**: Calls the LLM with the full history; appends one AI message that may
//!   request a search.
//! - **[`ActNode`]**: Executes the first pending tool call and appends its result (or the error
//!   text). Never fails the run.
//! - **[`tools_condition`]**: Routing: if the latest AI message has tool calls, go to act; else
//!   end. Returns [`ToolsConditionResult`].
//! - **[`ResearchAgent`]**: Drives reason → (act → reason)* → done with a cycle bound and an
//!   optional per-step timeout.

mod act_node;
mod runner;
mod think_node;

pub use act_node::{ActNode, SEARCH_ERROR_PREFIX};
pub use runner::{ResearchAgent, RunOutcome, Step, DEFAULT_MAX_CYCLES};
pub use think_node::ThinkNode;

use crate::state::ConversationState;

/// Default system prompt: business intelligence analyst that always searches first.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an elite business intelligence analyst. \
Your goal is to provide a comprehensive, data-backed report. \
ALWAYS use the search tool to find real-time data before answering. \
Format your final answer in clean Markdown.";

/// Output of the tools_condition function.
///
/// - `Tools` - Route to the act node
/// - `End` - Route to the end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolsConditionResult {
    /// Route to the tool execution node ("tools").
    Tools,
    /// Route to the end ("__end__").
    End,
}

impl ToolsConditionResult {
    /// Returns the routing key for this result.
    ///
    /// - `Tools` -> `"tools"`
    /// - `End` -> `"__end__"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tools => "tools",
            Self::End => "__end__",
        }
    }
}

/// Routing decision on the latest message.
///
/// `Tools` when the last message is an AI turn with at least one tool call; `End` for anything
/// else (including an empty conversation).
pub fn tools_condition(state: &ConversationState) -> ToolsConditionResult {
    match state.last() {
        Some(m) if !m.tool_calls().is_empty() => ToolsConditionResult::Tools,
        _ => ToolsConditionResult::End,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use crate::state::ToolCall;

    #[test]
    fn as_str_keys() {
        assert_eq!(ToolsConditionResult::Tools.as_str(), "tools");
        assert_eq!(ToolsConditionResult::End.as_str(), "__end__");
    }

    #[test]
    fn empty_state_ends() {
        assert_eq!(
            tools_condition(&ConversationState::default()),
            ToolsConditionResult::End
        );
    }

    #[test]
    fn tool_result_last_ends() {
        let call = ToolCall::search("c1", "q");
        let mut state = ConversationState::seed("sys", "hi");
        state.append(vec![
            Message::ai_with_tool_calls("", vec![call.clone()]),
            Message::tool_result(&call, "r"),
        ]);
        assert_eq!(tools_condition(&state), ToolsConditionResult::End);
    }
}
