//! OpenAI-compatible Chat Completions client implementing `LlmClient` (ChatOpenAI).
//!
//! Talks to any endpoint that speaks the Chat Completions protocol; the research service points
//! it at Groq (`GROQ_BASE_URL`, `GROQ_API_KEY`). When tools are bound the model may answer with
//! `tool_calls`; tool results from earlier turns are sent back as `tool` role messages so the
//! model sees the full history.
//!
//! Provider failures are split in two: rate limiting and quota exhaustion become
//! [`AgentError::RateLimited`], everything else [`AgentError::ExecutionFailed`]. Each call is a
//! single HTTP attempt; the client's built-in retry on 429/5xx is switched off.
//!
//! **Interaction**: Implements `LlmClient`; used by ThinkNode like `MockLlm`.

use std::collections::HashSet;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionMessageToolCalls, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage, ChatCompletionTool,
        ChatCompletionToolChoiceOption, ChatCompletionTools, CreateChatCompletionRequestArgs,
        FunctionObject, ToolChoiceOptions,
    },
    Client,
};
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, trace};

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, LlmUsage};
use crate::message::Message;
use crate::state::ToolCall;
use crate::tool_source::ToolSpec;

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Chat Completions client implementing `LlmClient`.
///
/// Build with [`ChatOpenAI::with_config`] (API key and base URL), then bind tools with
/// [`ChatOpenAI::with_tools`]. Tool choice is `auto` when tools are bound, so the model can
/// finish without searching.
///
/// **Interaction**: Implements `LlmClient`; used by ThinkNode.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    api_base: String,
    tools: Option<Vec<ToolSpec>>,
    temperature: Option<f32>,
}

impl ChatOpenAI {
    /// Build client for Groq with the given API key and the default model.
    pub fn groq(api_key: impl Into<String>) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(DEFAULT_GROQ_BASE_URL)
            .with_api_key(api_key.into());
        Self::with_config(config, DEFAULT_GROQ_MODEL)
    }

    /// Build client with custom config (API key, base URL).
    ///
    /// Retries are disabled: a 429 surfaces on the first response.
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        use async_openai::config::Config;
        let api_base = config.api_base().to_string();
        let single_attempt = backoff::ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        Self {
            client: Client::with_config(config).with_backoff(single_attempt),
            model: model.into(),
            api_base,
            tools: None,
            temperature: None,
        }
    }

    /// Set tools for this completion (enables tool_calls in response).
    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Set temperature, clamped to 0–2. Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature.clamp(0.0, 2.0));
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }

    /// Convert our `Message` list to request messages.
    ///
    /// System and human turns map directly. AI turns carry the tool calls that have an
    /// answering tool message; unanswered calls (only the first call of a turn is executed) are
    /// left out because the API rejects a call id without a matching tool message.
    fn messages_to_request(
        messages: &[Message],
    ) -> Result<Vec<ChatCompletionRequestMessage>, AgentError> {
        let answered: HashSet<&str> = messages
            .iter()
            .filter_map(|m| match m {
                Message::Tool { tool_call_id, .. } => Some(tool_call_id.as_str()),
                _ => None,
            })
            .collect();
        messages
            .iter()
            .map(|m| match m {
                Message::System { content } => Ok(ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(content.as_str()),
                )),
                Message::Human { content } => Ok(ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(content.as_str()),
                )),
                Message::Ai {
                    content,
                    tool_calls,
                } if !tool_calls.iter().any(|tc| answered.contains(tc.id.as_str())) => {
                    Ok(ChatCompletionRequestMessage::Assistant(content.as_str().into()))
                }
                Message::Ai {
                    content,
                    tool_calls,
                } => {
                    let calls: Vec<_> = tool_calls
                        .iter()
                        .filter(|tc| answered.contains(tc.id.as_str()))
                        .map(|tc| {
                            json!({
                                "id": tc.id,
                                "type": "function",
                                "function": {
                                    "name": tc.name,
                                    "arguments": tc.arguments_value().to_string(),
                                }
                            })
                        })
                        .collect();
                    request_message_from_json(json!({
                        "role": "assistant",
                        "content": content,
                        "tool_calls": calls,
                    }))
                }
                Message::Tool {
                    content,
                    tool_call_id,
                    ..
                } => request_message_from_json(json!({
                    "role": "tool",
                    "content": content,
                    "tool_call_id": tool_call_id,
                })),
            })
            .collect()
    }

    fn chat_tools(tools: &[ToolSpec]) -> Vec<ChatCompletionTools> {
        tools
            .iter()
            .map(|t| {
                ChatCompletionTools::Function(ChatCompletionTool {
                    function: FunctionObject {
                        name: t.name.clone(),
                        description: t.description.clone(),
                        parameters: Some(t.input_schema.clone()),
                        ..Default::default()
                    },
                })
            })
            .collect()
    }
}

fn request_message_from_json(
    value: serde_json::Value,
) -> Result<ChatCompletionRequestMessage, AgentError> {
    serde_json::from_value(value)
        .map_err(|e| AgentError::ExecutionFailed(format!("OpenAI message mapping failed: {}", e)))
}

/// True when the provider error text reports rate limiting or quota exhaustion.
///
/// Matches phrases only; a bare status number is not enough since ids and model names can
/// contain one.
pub(crate) fn is_rate_limit_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["rate limit", "rate_limit", "too many requests", "quota"]
        .iter()
        .any(|needle| lower.contains(needle))
}

/// Structured `code`/`type` of an API error, e.g. `rate_limit_exceeded`, `insufficient_quota`.
fn is_rate_limit_code(code: &str) -> bool {
    let lower = code.to_lowercase();
    lower.contains("rate_limit") || lower.contains("quota")
}

fn classify_error(err: OpenAIError) -> AgentError {
    let structured = match &err {
        OpenAIError::ApiError(api) => api
            .code
            .as_deref()
            .into_iter()
            .chain(api.r#type.as_deref())
            .any(is_rate_limit_code),
        _ => false,
    };
    let message = format!("OpenAI API error: {}", err);
    if structured || is_rate_limit_message(&message) {
        AgentError::RateLimited(message)
    } else {
        AgentError::ExecutionFailed(message)
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let trace_id = uuid::Uuid::new_v4().to_string();
        let openai_messages = Self::messages_to_request(messages)?;
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(openai_messages);

        if let Some(ref tools) = self.tools {
            if !tools.is_empty() {
                args.tools(Self::chat_tools(tools));
                args.tool_choice(ChatCompletionToolChoiceOption::Mode(
                    ToolChoiceOptions::Auto,
                ));
            }
        }

        if let Some(t) = self.temperature {
            args.temperature(t);
        }

        let request = args.build().map_err(|e| {
            AgentError::ExecutionFailed(format!("OpenAI request build failed: {}", e))
        })?;

        let tools_count = self.tools.as_ref().map(|t| t.len()).unwrap_or(0);
        let url = self.chat_completions_url();
        debug!(
            trace_id = %trace_id,
            url = %url,
            model = %self.model,
            message_count = messages.len(),
            tools_count = tools_count,
            temperature = ?self.temperature,
            "chat create"
        );
        if let Ok(js) = serde_json::to_string_pretty(&request) {
            trace!(trace_id = %trace_id, request = %js, "chat request body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(classify_error)?;

        if let Ok(js) = serde_json::to_string_pretty(&response) {
            trace!(trace_id = %trace_id, response = %js, "chat response body");
        }

        let choice =
            response.choices.into_iter().next().ok_or_else(|| {
                AgentError::ExecutionFailed("OpenAI returned no choices".to_string())
            })?;

        let msg = choice.message;
        let content = msg.content.unwrap_or_default();
        let tool_calls: Vec<ToolCall> = msg
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tc| {
                if let ChatCompletionMessageToolCalls::Function(f) = tc {
                    let id = if f.id.is_empty() {
                        format!("call_{}", uuid::Uuid::new_v4().simple())
                    } else {
                        f.id
                    };
                    Some(ToolCall::new(
                        id,
                        f.function.name,
                        ToolCall::parse_arguments(&f.function.arguments),
                    ))
                } else {
                    None
                }
            })
            .collect();

        let usage = response.usage.map(|u| LlmUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        Ok(LlmResponse {
            content,
            tool_calls,
            usage,
        })
    }
}
