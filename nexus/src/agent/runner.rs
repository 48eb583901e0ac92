//! Loop controller: REASON → (ACT → REASON)* → DONE.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::graph::{
    log_node_complete, log_node_start, log_run_complete, log_run_error, log_run_start, Node,
};
use crate::llm::{LlmClient, LlmUsage};
use crate::state::ConversationState;
use crate::tools::Tool;

use super::act_node::ActNode;
use super::think_node::ThinkNode;
use super::{tools_condition, ToolsConditionResult};

/// Maximum number of tool executions per run unless configured otherwise.
pub const DEFAULT_MAX_CYCLES: usize = 6;

/// Controller states, also recorded as the step trace of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Reason,
    Act,
    Done,
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Content of the last AI message. When truncated: the latest non-empty AI content, else
    /// the latest search result.
    pub report: String,
    /// Every state the controller passed through, ending with `Done`.
    pub steps: Vec<Step>,
    /// Number of tool executions.
    pub cycles: usize,
    /// True when the cycle bound forced `Done` while the model still wanted a tool.
    pub truncated: bool,
    /// Token usage summed over all reasoning steps that reported it.
    pub usage: Option<LlmUsage>,
}

/// Research agent: one LLM, one tool, a bounded reason/act loop.
///
/// Holds no per-request state; one instance can serve concurrent runs.
///
/// **Interaction**: Built by [`build_research_service`](crate::build_research_service) or
/// directly from any [`LlmClient`] and [`Tool`]; used by
/// [`ResearchService`](crate::ResearchService).
pub struct ResearchAgent {
    think: ThinkNode,
    act: ActNode,
    max_cycles: usize,
    step_timeout: Option<Duration>,
}

impl ResearchAgent {
    pub fn new(llm: Arc<dyn LlmClient>, tool: Arc<dyn Tool>) -> Self {
        Self {
            think: ThinkNode::new(llm),
            act: ActNode::new(tool),
            max_cycles: DEFAULT_MAX_CYCLES,
            step_timeout: None,
        }
    }

    /// Upper bound on tool executions per run.
    pub fn with_max_cycles(mut self, max_cycles: usize) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    /// Per-step limit for both the LLM call and the tool call.
    pub fn with_step_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.step_timeout = timeout;
        self.think = self.think.with_timeout(timeout);
        self.act = self.act.with_timeout(timeout);
        self
    }

    pub fn max_cycles(&self) -> usize {
        self.max_cycles
    }

    pub fn step_timeout(&self) -> Option<Duration> {
        self.step_timeout
    }

    /// Seeds a fresh conversation with `(system, human)` and runs it to completion.
    pub async fn run(
        &self,
        system_prompt: &str,
        prompt: &str,
    ) -> Result<(ConversationState, RunOutcome), AgentError> {
        let mut state = ConversationState::seed(system_prompt, prompt);
        let outcome = self.run_state(&mut state).await?;
        Ok((state, outcome))
    }

    /// Runs the loop over a caller-owned conversation.
    ///
    /// Messages are appended to `state` as each step finishes, so on error `state` still holds
    /// every message produced before the failing step.
    pub async fn run_state(
        &self,
        state: &mut ConversationState,
    ) -> Result<RunOutcome, AgentError> {
        log_run_start(self.max_cycles);
        let result = self.drive(state).await;
        match result {
            Ok(ref outcome) => log_run_complete(outcome.cycles, outcome.truncated),
            Err(ref e) => log_run_error(e),
        }
        result
    }

    async fn drive(&self, state: &mut ConversationState) -> Result<RunOutcome, AgentError> {
        let mut steps = Vec::new();
        let mut cycles = 0usize;
        let mut truncated = false;
        let mut usage: Option<LlmUsage> = None;
        let mut step = Step::Reason;

        loop {
            steps.push(step);
            match step {
                Step::Reason => {
                    log_node_start(self.think.id(), state.len());
                    let (message, step_usage) = self.think.reason(state).await?;
                    state.append(vec![message]);
                    log_node_complete(self.think.id(), 1);
                    if let Some(u) = step_usage {
                        usage = Some(match usage {
                            Some(total) => total.add(&u),
                            None => u,
                        });
                    }
                    step = match tools_condition(state) {
                        ToolsConditionResult::End => Step::Done,
                        ToolsConditionResult::Tools if cycles >= self.max_cycles => {
                            tracing::warn!(
                                max_cycles = self.max_cycles,
                                "Cycle bound reached, finishing without running the tool"
                            );
                            truncated = true;
                            Step::Done
                        }
                        ToolsConditionResult::Tools => Step::Act,
                    };
                }
                Step::Act => {
                    log_node_start(self.act.id(), state.len());
                    let update = self.act.run(state).await?;
                    let appended = update.len();
                    state.append(update);
                    log_node_complete(self.act.id(), appended);
                    cycles += 1;
                    step = Step::Reason;
                }
                Step::Done => break,
            }
        }

        let report = if truncated {
            state.partial_report().to_string()
        } else {
            state.last_ai_content().unwrap_or_default().to_string()
        };
        Ok(RunOutcome {
            report,
            steps,
            cycles,
            truncated,
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;
    use crate::tools::MockSearchTool;

    #[tokio::test]
    async fn zero_max_cycles_never_acts() {
        let tool = Arc::new(MockSearchTool::new("r"));
        let agent = ResearchAgent::new(Arc::new(MockLlm::always_search("q")), tool.clone())
            .with_max_cycles(0);
        let (state, outcome) = agent.run("sys", "hi").await.unwrap();
        assert!(outcome.truncated);
        assert_eq!(outcome.cycles, 0);
        assert_eq!(outcome.steps, vec![Step::Reason, Step::Done]);
        assert_eq!(tool.call_count(), 0);
        assert_eq!(state.len(), 3);
        assert_eq!(outcome.report, "");
    }

    #[test]
    fn step_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Step::Reason).unwrap(), "\"reason\"");
    }
}
