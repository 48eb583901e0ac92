//! Append-only conversation log shared by the research loop.

use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::state::ToolCall;

/// Ordered message log for one request.
///
/// Mutable only by [`append`](Self::append): nodes return the messages they produced and the
/// loop concatenates them. Created per request with [`seed`](Self::seed) and dropped when the
/// request completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    messages: Vec<Message>,
}

impl ConversationState {
    /// Seed entries: system persona, then the user's prompt.
    pub fn seed(system_prompt: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt), Message::human(prompt)],
        }
    }

    /// Concatenates `update` onto the log. An empty update is a no-op.
    pub fn append(&mut self, update: Vec<Message>) {
        self.messages.extend(update);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// First tool call of the last message, when that message is an AI turn requesting tools.
    ///
    /// Only the first call is ever executed; extra calls in the same turn are ignored.
    pub fn pending_tool_call(&self) -> Option<&ToolCall> {
        self.last().and_then(|m| m.tool_calls().first())
    }

    /// Content of the chronologically last AI message, if any.
    pub fn last_ai_content(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::Ai { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    /// Best text for a run cut short: the latest non-empty AI content, else the latest tool
    /// result. Empty when neither exists.
    pub fn partial_report(&self) -> &str {
        let ai = self.messages.iter().rev().find_map(|m| match m {
            Message::Ai { content, .. } if !content.trim().is_empty() => Some(content.as_str()),
            _ => None,
        });
        ai.or_else(|| {
            self.messages.iter().rev().find_map(|m| match m {
                Message::Tool { content, .. } => Some(content.as_str()),
                _ => None,
            })
        })
        .unwrap_or_default()
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_system_then_human() {
        let state = ConversationState::seed("persona", "prompt");
        assert_eq!(state.len(), 2);
        assert_eq!(state.messages()[0], Message::system("persona"));
        assert_eq!(state.messages()[1], Message::human("prompt"));
        assert!(state.pending_tool_call().is_none());
        assert!(state.last_ai_content().is_none());
    }

    #[test]
    fn append_concatenates_in_order() {
        let mut state = ConversationState::seed("s", "h");
        state.append(vec![]);
        assert_eq!(state.len(), 2);
        let call = ToolCall::search("c1", "q");
        state.append(vec![
            Message::ai_with_tool_calls("", vec![call.clone()]),
            Message::tool_result(&call, "r"),
        ]);
        assert_eq!(state.len(), 4);
        assert_eq!(state.last(), Some(&Message::tool_result(&call, "r")));
    }

    #[test]
    fn pending_tool_call_is_first_call_of_last_ai_message() {
        let mut state = ConversationState::seed("s", "h");
        let first = ToolCall::search("c1", "one");
        let second = ToolCall::search("c2", "two");
        state.append(vec![Message::ai_with_tool_calls(
            "",
            vec![first.clone(), second],
        )]);
        assert_eq!(state.pending_tool_call(), Some(&first));

        state.append(vec![Message::tool_result(&first, "r")]);
        assert!(state.pending_tool_call().is_none());
    }

    #[test]
    fn last_ai_content_skips_tool_messages() {
        let mut state = ConversationState::seed("s", "h");
        let call = ToolCall::search("c1", "q");
        state.append(vec![
            Message::ai_with_tool_calls("looking it up", vec![call.clone()]),
            Message::tool_result(&call, "r"),
        ]);
        assert_eq!(state.last_ai_content(), Some("looking it up"));
    }

    #[test]
    fn partial_report_prefers_non_empty_ai_content() {
        let mut state = ConversationState::seed("s", "h");
        assert_eq!(state.partial_report(), "");
        let first = ToolCall::search("c1", "q");
        let second = ToolCall::search("c2", "q2");
        state.append(vec![
            Message::ai_with_tool_calls("", vec![first.clone()]),
            Message::tool_result(&first, "gold at $2400"),
            Message::ai_with_tool_calls("", vec![second.clone()]),
        ]);
        assert_eq!(state.partial_report(), "gold at $2400");

        state.append(vec![
            Message::tool_result(&second, "silver at $30"),
            Message::ai_with_tool_calls("Gold is near $2400.", vec![ToolCall::search("c3", "x")]),
        ]);
        assert_eq!(state.partial_report(), "Gold is near $2400.");
    }
}
