//! # Nexus
//!
//! A research agent: a language model reasons over the conversation, asks for web searches when
//! it needs real-time data, reads the results and finally writes a Markdown report.
//!
//! The loop is REASON → (ACT → REASON)* → DONE:
//!
//! - [`ThinkNode`] calls an [`LlmClient`] with the full history and appends one AI message.
//! - [`tools_condition`] routes to [`ActNode`] when that message requests a tool, else ends.
//! - [`ActNode`] runs the first requested search through a [`Tool`] and appends the result;
//!   tool failures become `Error during search: ...` text instead of errors.
//! - [`ResearchAgent`] drives the loop with a cycle bound and an optional per-step timeout.
//! - [`ResearchService`] is the request boundary: it rejects empty prompts and turns model rate
//!   limiting into a `demo_mode` response with a fallback report.
//!
//! ## Main modules
//!
//! - [`agent`]: [`ThinkNode`], [`ActNode`], [`tools_condition`], [`ResearchAgent`].
//! - [`state`]: [`ConversationState`], [`ToolCall`].
//! - [`message`]: [`Message`] (System / Human / Ai / Tool).
//! - [`llm`]: [`LlmClient`] trait, [`ChatOpenAI`] (Groq by default), [`MockLlm`].
//! - [`tools`]: [`Tool`] trait, [`TavilySearchTool`], [`MockSearchTool`].
//! - [`tool_source`]: [`ToolSpec`], [`ToolCallContent`], [`ToolSourceError`].
//! - [`graph`]: [`Node`] trait and run logging.
//! - [`config`]: [`ResearchConfig`] from env, `.env` and XDG config.
//! - [`service`]: [`ResearchService`], [`ResearchRequest`], [`ResearchResponse`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use nexus::{build_from_env, ResearchRequest};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let service = build_from_env()?;
//! let response = service
//!     .start_research(ResearchRequest::new("Current gold price and outlook"))
//!     .await?;
//! println!("{}", response.report);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod builder;
pub mod config;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod service;
pub mod state;
pub mod tool_source;
pub mod tools;

pub use agent::{
    tools_condition, ActNode, ResearchAgent, RunOutcome, Step, ThinkNode, ToolsConditionResult,
    DEFAULT_MAX_CYCLES, DEFAULT_SYSTEM_PROMPT, SEARCH_ERROR_PREFIX,
};
pub use builder::{build_from_env, build_research_service, BuildError};
pub use config::ResearchConfig;
pub use error::AgentError;
pub use graph::Node;
pub use llm::{ChatOpenAI, LlmClient, LlmResponse, LlmUsage, MockLlm, MockTurn};
pub use message::{Message, Role};
pub use service::{
    ResearchError, ResearchRequest, ResearchResponse, ResearchService, ResearchStatus,
};
pub use state::{ConversationState, ToolCall, SEARCH_TOOL_NAME};
pub use tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
pub use tools::{MockSearchTool, TavilySearchTool, Tool};
