//! Agent execution error types.
//!
//! Returned by [`LlmClient::invoke`](crate::llm::LlmClient::invoke), by graph nodes and by the
//! research loop. Tool failures never show up here: the act node turns them into text.

use std::time::Duration;

use thiserror::Error;

/// Agent execution error.
///
/// Split by what the request boundary does with it: [`AgentError::RateLimited`] and
/// [`AgentError::Timeout`] are recoverable (the service answers in demo mode), everything
/// else fails the request.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. malformed provider response, network fault).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The model provider rejected the call because of rate limiting or an exhausted quota.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// A single step did not finish within the configured step timeout.
    #[error("step '{step}' timed out after {after:?}")]
    Timeout { step: String, after: Duration },
}

impl AgentError {
    /// True for the failure kinds the request boundary downgrades to a fallback report.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display of ExecutionFailed contains "execution failed" and the message.
    #[test]
    fn agent_error_display_execution_failed() {
        let s = AgentError::ExecutionFailed("msg".to_string()).to_string();
        assert!(s.contains("execution failed"), "{}", s);
        assert!(s.contains("msg"), "{}", s);
    }

    #[test]
    fn agent_error_display_timeout_names_step() {
        let err = AgentError::Timeout {
            step: "think".to_string(),
            after: Duration::from_secs(3),
        };
        let s = err.to_string();
        assert!(s.contains("think"), "{}", s);
        assert!(s.contains("3s"), "{}", s);
    }

    #[test]
    fn only_rate_limit_and_timeout_are_recoverable() {
        assert!(AgentError::RateLimited("429".into()).is_recoverable());
        assert!(AgentError::Timeout {
            step: "think".into(),
            after: Duration::from_millis(1),
        }
        .is_recoverable());
        assert!(!AgentError::ExecutionFailed("boom".into()).is_recoverable());
    }
}
