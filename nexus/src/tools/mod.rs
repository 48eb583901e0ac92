//! Tools the act node can execute.
//!
//! - [`Tool`]: the tool boundary (name, spec for the model, async call).
//! - [`TavilySearchTool`]: web search via the Tavily API.
//! - [`MockSearchTool`]: deterministic search double for tests and demos.

mod mock;
pub mod tavily;
mod r#trait;

pub use mock::MockSearchTool;
pub use r#trait::Tool;
pub use tavily::{TavilySearchTool, DEFAULT_TAVILY_BASE_URL};
