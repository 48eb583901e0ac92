//! Request boundary: one research request in, one report out.
//!
//! Rate limiting and step timeouts from the model are downgraded to a `demo_mode` response with
//! the configured fallback report; every other agent error fails the request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::agent::{ResearchAgent, DEFAULT_SYSTEM_PROMPT};
use crate::config::DEFAULT_FALLBACK_REPORT;
use crate::error::AgentError;
use crate::state::ConversationState;

/// Inbound request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchRequest {
    pub prompt: String,
}

impl ResearchRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// How the report was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchStatus {
    /// The model finished on its own.
    Success,
    /// The model was unavailable; `report` is the fallback text.
    DemoMode,
    /// The cycle bound stopped the run while the model still wanted to search.
    Partial,
}

/// Response: `{"status": ..., "report": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchResponse {
    pub status: ResearchStatus,
    pub report: String,
}

/// Request-level failure.
#[derive(Debug, Error)]
pub enum ResearchError {
    #[error("prompt must not be empty")]
    EmptyPrompt,
    #[error(transparent)]
    Agent(#[from] AgentError),
}

/// Research service: system prompt + agent + fallback policy.
///
/// **Interaction**: Built by [`build_research_service`](crate::build_research_service); the
/// agent is shared read-only, so `start_research` may run concurrently.
pub struct ResearchService {
    agent: ResearchAgent,
    system_prompt: String,
    fallback_report: String,
}

impl ResearchService {
    pub fn new(agent: ResearchAgent) -> Self {
        Self {
            agent,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            fallback_report: DEFAULT_FALLBACK_REPORT.to_string(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_fallback_report(mut self, report: impl Into<String>) -> Self {
        self.fallback_report = report.into();
        self
    }

    pub fn agent(&self) -> &ResearchAgent {
        &self.agent
    }

    /// Runs one request to completion.
    pub async fn start_research(
        &self,
        request: ResearchRequest,
    ) -> Result<ResearchResponse, ResearchError> {
        if request.prompt.trim().is_empty() {
            return Err(ResearchError::EmptyPrompt);
        }
        let mut state = ConversationState::seed(self.system_prompt.as_str(), request.prompt);
        match self.agent.run_state(&mut state).await {
            Ok(outcome) => {
                let status = if outcome.truncated {
                    ResearchStatus::Partial
                } else {
                    ResearchStatus::Success
                };
                tracing::info!(
                    status = ?status,
                    cycles = outcome.cycles,
                    report_len = outcome.report.len(),
                    "Research finished"
                );
                Ok(ResearchResponse {
                    status,
                    report: outcome.report,
                })
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!(
                    error = %e,
                    messages = state.len(),
                    "Model unavailable, returning fallback report"
                );
                Ok(ResearchResponse {
                    status: ResearchStatus::DemoMode,
                    report: self.fallback_report.clone(),
                })
            }
            Err(e) => Err(ResearchError::Agent(e)),
        }
    }
}
