//! Research settings from the environment.
//!
//! [`ResearchConfig::load`] first applies `.env` and `$XDG_CONFIG_HOME/nexus/config.toml` to
//! the process environment (existing variables win), then reads every setting from it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::agent::{DEFAULT_MAX_CYCLES, DEFAULT_SYSTEM_PROMPT};
use crate::llm::{DEFAULT_GROQ_BASE_URL, DEFAULT_GROQ_MODEL};
use crate::tools::DEFAULT_TAVILY_BASE_URL;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TAVILY_MAX_RESULTS: u32 = 3;

/// Report returned in demo mode when live research is unavailable.
pub const DEFAULT_FALLBACK_REPORT: &str = "## Demo Report\n\n\
Live research is temporarily unavailable because the language model is rate limited. \
This is a placeholder report; please retry the request in a minute.";

/// Settings for building a [`ResearchService`](crate::ResearchService).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResearchConfig {
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub groq_base_url: String,
    pub temperature: f32,
    pub tavily_api_key: Option<String>,
    pub tavily_base_url: String,
    pub tavily_max_results: u32,
    pub max_cycles: usize,
    pub step_timeout_secs: Option<u64>,
    pub system_prompt: String,
    pub fallback_report: String,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            groq_api_key: None,
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            groq_base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            tavily_api_key: None,
            tavily_base_url: DEFAULT_TAVILY_BASE_URL.to_string(),
            tavily_max_results: DEFAULT_TAVILY_MAX_RESULTS,
            max_cycles: DEFAULT_MAX_CYCLES,
            step_timeout_secs: None,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            fallback_report: DEFAULT_FALLBACK_REPORT.to_string(),
        }
    }
}

impl ResearchConfig {
    /// Applies `.env` and XDG config to the environment, then reads it.
    pub fn load() -> Result<Self, env_config::LoadError> {
        env_config::load_and_apply("nexus", None)?;
        Ok(Self::from_env())
    }

    /// Builds config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds config from any key lookup. Empty values count as unset; unparseable numbers fall
    /// back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let d = Self::default();
        Self {
            groq_api_key: get("GROQ_API_KEY"),
            groq_model: get("GROQ_MODEL").unwrap_or(d.groq_model),
            groq_base_url: get("GROQ_BASE_URL").unwrap_or(d.groq_base_url),
            temperature: get("NEXUS_TEMPERATURE")
                .and_then(|s| s.trim().parse::<f32>().ok())
                .filter(|t| t.is_finite())
                .map(|t| t.clamp(0.0, 2.0))
                .unwrap_or(d.temperature),
            tavily_api_key: get("TAVILY_API_KEY"),
            tavily_base_url: get("TAVILY_BASE_URL").unwrap_or(d.tavily_base_url),
            tavily_max_results: get("TAVILY_MAX_RESULTS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(d.tavily_max_results),
            max_cycles: get("NEXUS_MAX_CYCLES")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(d.max_cycles),
            step_timeout_secs: get("NEXUS_STEP_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .filter(|secs| *secs > 0),
            system_prompt: get("NEXUS_SYSTEM_PROMPT").unwrap_or(d.system_prompt),
            fallback_report: get("NEXUS_FALLBACK_REPORT").unwrap_or(d.fallback_report),
        }
    }

    pub fn step_timeout(&self) -> Option<Duration> {
        self.step_timeout_secs.map(Duration::from_secs)
    }
}
