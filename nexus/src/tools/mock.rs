//! Mock search tool for tests and examples.
//!
//! Deterministic: the same arguments always produce the same text. Can be configured to fail
//! or to sleep before answering (for step-timeout tests).

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::state::SEARCH_TOOL_NAME;
use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::tools::Tool;

/// Mock `search` tool.
///
/// Answers with a fixed result per query (see [`with_answer`](Self::with_answer)), falling back
/// to a default text. [`failing`](Self::failing) makes every call return a transport error.
pub struct MockSearchTool {
    default_result: String,
    answers: HashMap<String, String>,
    failure: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockSearchTool {
    /// Returns `default_result` for every query.
    pub fn new(default_result: impl Into<String>) -> Self {
        Self {
            default_result: default_result.into(),
            answers: HashMap::new(),
            failure: None,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every call fails with `ToolSourceError::Transport(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new("")
        }
    }

    /// Fixed result for one query (builder).
    pub fn with_answer(mut self, query: impl Into<String>, result: impl Into<String>) -> Self {
        self.answers.insert(query.into(), result.into());
        self
    }

    /// Sleep before answering (builder).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times `call` ran.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Tool for MockSearchTool {
    fn name(&self) -> &str {
        SEARCH_TOOL_NAME
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::search()
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(ref message) = self.failure {
            return Err(ToolSourceError::Transport(message.clone()));
        }
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolSourceError::InvalidInput("missing query".to_string()))?;
        let text = self
            .answers
            .get(query)
            .cloned()
            .unwrap_or_else(|| self.default_result.clone());
        Ok(ToolCallContent { text })
    }
}
