//! Mock LLM for tests and examples.
//!
//! Plays a script of turns in order; once the script is exhausted the last turn repeats.
//! Turns can be answers, tool-call requests, rate-limit failures or plain failures, so every
//! route through the research loop can be driven without a network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, LlmUsage};
use crate::message::Message;
use crate::state::ToolCall;

/// One scripted turn of [`MockLlm`].
#[derive(Clone, Debug)]
pub enum MockTurn {
    /// Final answer, no tool calls.
    Answer(String),
    /// Empty content plus the given tool calls.
    ToolCalls(Vec<ToolCall>),
    /// Fails with [`AgentError::RateLimited`].
    RateLimited(String),
    /// Fails with [`AgentError::ExecutionFailed`].
    Fail(String),
}

impl MockTurn {
    /// A turn requesting one `search` call.
    pub fn search(id: impl Into<String>, query: impl Into<String>) -> Self {
        Self::ToolCalls(vec![ToolCall::search(id, query)])
    }
}

/// Mock LLM: scripted turns, records the histories it was called with.
pub struct MockLlm {
    script: Vec<MockTurn>,
    usage: Option<LlmUsage>,
    delay: Option<Duration>,
    call_count: AtomicUsize,
    received: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// Plays `script` in order, repeating the last turn.
    pub fn scripted(script: Vec<MockTurn>) -> Self {
        Self {
            script,
            usage: None,
            delay: None,
            call_count: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Always answers `content` without tool calls.
    pub fn with_no_tool_calls(content: impl Into<String>) -> Self {
        Self::scripted(vec![MockTurn::Answer(content.into())])
    }

    /// Always asks to search `query` (never finishes on its own).
    pub fn always_search(query: impl Into<String>) -> Self {
        Self::scripted(vec![MockTurn::search("call-1", query)])
    }

    /// First call asks to search `query`, every later call answers `answer`.
    pub fn search_then_answer(query: impl Into<String>, answer: impl Into<String>) -> Self {
        Self::scripted(vec![
            MockTurn::search("call-1", query),
            MockTurn::Answer(answer.into()),
        ])
    }

    /// Every call fails with a rate-limit error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::scripted(vec![MockTurn::RateLimited(message.into())])
    }

    /// Every call fails with a non-recoverable error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::scripted(vec![MockTurn::Fail(message.into())])
    }

    /// Usage reported with every successful turn (builder).
    pub fn with_usage(mut self, usage: LlmUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Sleep before answering (builder).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times `invoke` ran.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Histories passed to each `invoke`, oldest first.
    pub fn received(&self) -> Vec<Vec<Message>> {
        self.received
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn turn(&self, n: usize) -> MockTurn {
        self.script
            .get(n)
            .or_else(|| self.script.last())
            .cloned()
            .unwrap_or_else(|| MockTurn::Answer(String::new()))
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let n = self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut r) = self.received.lock() {
            r.push(messages.to_vec());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.turn(n) {
            MockTurn::Answer(content) => Ok(LlmResponse {
                content,
                tool_calls: vec![],
                usage: self.usage.clone(),
            }),
            MockTurn::ToolCalls(tool_calls) => Ok(LlmResponse {
                content: String::new(),
                tool_calls,
                usage: self.usage.clone(),
            }),
            MockTurn::RateLimited(message) => Err(AgentError::RateLimited(message)),
            MockTurn::Fail(message) => Err(AgentError::ExecutionFailed(message)),
        }
    }
}
