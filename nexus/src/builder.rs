//! Wires [`ResearchConfig`] into a ready [`ResearchService`]: Groq chat client with the search
//! tool bound, Tavily search, loop bounds and prompts.

use std::sync::Arc;

use async_openai::config::OpenAIConfig;
use thiserror::Error;

use crate::agent::ResearchAgent;
use crate::config::ResearchConfig;
use crate::llm::ChatOpenAI;
use crate::service::ResearchService;
use crate::tools::{TavilySearchTool, Tool};

/// Errors while building the service.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("missing API key: set {0}")]
    MissingApiKey(&'static str),
    #[error("config: {0}")]
    Config(#[from] env_config::LoadError),
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, BuildError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(BuildError::MissingApiKey(name))
}

/// Builds the research service from config.
pub fn build_research_service(config: &ResearchConfig) -> Result<ResearchService, BuildError> {
    let groq_key = required(&config.groq_api_key, "GROQ_API_KEY")?;
    let tavily_key = required(&config.tavily_api_key, "TAVILY_API_KEY")?;

    let tool = TavilySearchTool::new(tavily_key)
        .with_base_url(config.tavily_base_url.clone())
        .with_max_results(config.tavily_max_results);
    let openai_config = OpenAIConfig::new()
        .with_api_base(config.groq_base_url.trim_end_matches('/'))
        .with_api_key(groq_key);
    let llm = ChatOpenAI::with_config(openai_config, config.groq_model.clone())
        .with_tools(vec![tool.spec()])
        .with_temperature(config.temperature);

    tracing::debug!(
        model = %config.groq_model,
        max_cycles = config.max_cycles,
        step_timeout = ?config.step_timeout(),
        "Building research service"
    );
    let agent = ResearchAgent::new(Arc::new(llm), Arc::new(tool))
        .with_max_cycles(config.max_cycles)
        .with_step_timeout(config.step_timeout());
    Ok(ResearchService::new(agent)
        .with_system_prompt(config.system_prompt.clone())
        .with_fallback_report(config.fallback_report.clone()))
}

/// [`ResearchConfig::load`] followed by [`build_research_service`].
pub fn build_from_env() -> Result<ResearchService, BuildError> {
    let config = ResearchConfig::load()?;
    build_research_service(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_groq_key_is_reported() {
        let config = ResearchConfig {
            tavily_api_key: Some("t".into()),
            ..ResearchConfig::default()
        };
        let err = build_research_service(&config).err().unwrap();
        assert!(matches!(err, BuildError::MissingApiKey("GROQ_API_KEY")));
    }

    #[test]
    fn missing_tavily_key_is_reported() {
        let config = ResearchConfig {
            groq_api_key: Some("g".into()),
            tavily_api_key: Some(" ".into()),
            ..ResearchConfig::default()
        };
        let err = build_research_service(&config).err().unwrap();
        assert!(matches!(err, BuildError::MissingApiKey("TAVILY_API_KEY")));
    }

    #[test]
    fn builds_with_both_keys() {
        let config = ResearchConfig {
            groq_api_key: Some("g".into()),
            tavily_api_key: Some("t".into()),
            max_cycles: 2,
            step_timeout_secs: Some(10),
            ..ResearchConfig::default()
        };
        let service = build_research_service(&config).unwrap();
        assert_eq!(service.agent().max_cycles(), 2);
        assert_eq!(
            service.agent().step_timeout(),
            Some(std::time::Duration::from_secs(10))
        );
    }
}
