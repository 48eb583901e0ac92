//! Step abstraction for the research loop.
//!
//! A [`Node`] reads the conversation and returns the messages to append; the loop controller
//! ([`ResearchAgent`](crate::ResearchAgent)) owns the state and does the appending.

mod logging;
mod node;

pub use logging::{
    log_node_complete, log_node_start, log_run_complete, log_run_error, log_run_start,
};
pub use node::Node;
