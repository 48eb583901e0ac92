//! Tavily web search tool: one `search` tool returning the top results as text.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::state::SEARCH_TOOL_NAME;
use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::tools::Tool;

pub const DEFAULT_TAVILY_BASE_URL: &str = "https://api.tavily.com";
const DEFAULT_MAX_RESULTS: u32 = 3;
const MAX_RESULTS_CAP: u32 = 20;
const CONTENT_MAX_CHARS: usize = 1200;

/// Web search via Tavily (`POST {base}/search`).
pub struct TavilySearchTool {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    max_results: u32,
    search_depth: String,
}

impl TavilySearchTool {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_TAVILY_BASE_URL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            search_depth: "basic".to_string(),
        }
    }

    /// Overrides the API base (e.g. a proxy or a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Number of results to request, clamped to 1..=20.
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results.clamp(1, MAX_RESULTS_CAP);
        self
    }

    /// `basic` or `advanced`.
    pub fn with_search_depth(mut self, depth: impl Into<String>) -> Self {
        self.search_depth = depth.into();
        self
    }

    /// Custom HTTP client (timeouts, proxies).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }

    async fn search(&self, query: &str) -> Result<Value, ToolSourceError> {
        let body = json!({
            "query": query,
            "max_results": self.max_results,
            "search_depth": self.search_depth,
            "include_answer": false,
        });
        let res = self
            .client
            .post(self.search_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ToolSourceError::Transport(e.to_string()))?;
        if !res.status().is_success() {
            let status = res.status();
            let err_body = res.text().await.unwrap_or_default();
            return Err(ToolSourceError::Transport(format!(
                "Tavily API error {}: {}",
                status, err_body
            )));
        }
        res.json()
            .await
            .map_err(|e| ToolSourceError::Transport(e.to_string()))
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max).collect::<String>())
    }
}

/// Numbered `title / URL / excerpt` blocks; `"No results."` when the list is empty.
pub(crate) fn format_results(value: &Value) -> String {
    let results: &[Value] = value
        .get("results")
        .and_then(|r| r.as_array())
        .map(|v| v.as_slice())
        .unwrap_or(&[]);
    let mut s = String::new();
    for (i, r) in results.iter().enumerate() {
        let title = r.get("title").and_then(|t| t.as_str()).unwrap_or("(no title)");
        let url = r.get("url").and_then(|u| u.as_str()).unwrap_or("");
        s.push_str(&format!("[{}] {}\n  URL: {}\n", i + 1, title, url));
        let content = r.get("content").and_then(|c| c.as_str()).unwrap_or("").trim();
        if !content.is_empty() {
            s.push_str(&format!(
                "  {}\n",
                truncate_chars(content, CONTENT_MAX_CHARS).replace('\n', " ")
            ));
        }
        s.push('\n');
    }
    if s.is_empty() {
        "No results.".to_string()
    } else {
        s.trim_end().to_string()
    }
}

#[async_trait]
impl Tool for TavilySearchTool {
    fn name(&self) -> &str {
        SEARCH_TOOL_NAME
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::search()
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| ToolSourceError::InvalidInput("missing query".to_string()))?;
        tracing::debug!(query = %query, max_results = self.max_results, "Tavily search");
        let value = self.search(query).await?;
        Ok(ToolCallContent {
            text: format_results(&value),
        })
    }
}
