//! Logging utilities for loop execution.
//!
//! Structured `tracing` events for node and run lifecycle.

use crate::error::AgentError;

/// Log node execution start.
pub fn log_node_start(node_id: &str, message_count: usize) {
    tracing::debug!(node_id = node_id, message_count, "Starting node execution");
}

/// Log node execution completion with the number of appended messages.
pub fn log_node_complete(node_id: &str, appended: usize) {
    tracing::debug!(node_id = node_id, appended, "Node execution complete");
}

/// Log run start.
pub fn log_run_start(max_cycles: usize) {
    tracing::info!(max_cycles, "Starting research run");
}

/// Log run completion.
pub fn log_run_complete(cycles: usize, truncated: bool) {
    tracing::info!(cycles, truncated, "Research run complete");
}

/// Log run error.
pub fn log_run_error(error: &AgentError) {
    if error.is_recoverable() {
        tracing::warn!(%error, "Research run stopped");
    } else {
        tracing::error!(%error, "Research run error");
    }
}
