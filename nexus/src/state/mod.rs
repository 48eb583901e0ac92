//! State types for the research loop.
//!
//! The conversation flows through [`ThinkNode`](crate::ThinkNode) and
//! [`ActNode`](crate::ActNode); each node returns the messages it produced and the
//! [`ResearchAgent`](crate::ResearchAgent) appends them.
//!
//! # Main types
//!
//! - [`ConversationState`]: append-only message log, seeded with System + Human.
//! - [`ToolCall`]: one tool invocation requested by the model; the act node executes the first.
//!
//! # Example
//!
//! ```rust
//! use nexus::{ConversationState, Message};
//!
//! let mut state = ConversationState::seed("You are a research analyst.", "Price of gold?");
//! state.append(vec![Message::ai("About $2400/oz.")]);
//! assert_eq!(state.len(), 3);
//! ```

mod conversation;
mod tool_call;

pub use conversation::ConversationState;
pub use tool_call::{ToolCall, SEARCH_TOOL_NAME};
