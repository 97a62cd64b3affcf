//! Anthropic Messages builder.
//!
//! The system prompt travels in a distinct top-level `system` field and
//! `max_tokens` is mandatory on this wire. The output ceiling is fixed at
//! 4096 tokens, so larger intent budgets are clamped.

use serde::{Deserialize, Serialize};

use crate::builder::{BuilderCapabilities, RequestBuilder, validate_prompts};
use crate::config::AnthropicSettings;
use crate::error::{RequestError, Result};
use crate::prompts::{PERSONA_SYSTEM_PROMPT, prompt_with_files_context};
use crate::types::{ChatParameters, CompletionRequest, Exchange};

/// Fixed output-token ceiling of the Messages wire.
pub const ANTHROPIC_MAX_OUTPUT_TOKENS: u32 = 4096;

/// One Messages-API turn. Only `user` and `assistant` roles exist here; the
/// system prompt is a separate field on the request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnthropicMessage {
    pub role: String,
    pub content: String,
}

impl AnthropicMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Anthropic Messages request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnthropicChatRequest {
    pub model: String,
    pub system: String,
    pub messages: Vec<AnthropicMessage>,
    pub max_tokens: u32,
    pub stream: bool,
}

fn conversation_messages(history: &[Exchange], user_prompt: &str) -> Vec<AnthropicMessage> {
    let mut messages = Vec::with_capacity(history.len() * 2 + 1);
    for exchange in history {
        messages.push(AnthropicMessage::user(&exchange.prompt));
        messages.push(AnthropicMessage::assistant(&exchange.response));
    }
    messages.push(AnthropicMessage::user(user_prompt));
    messages
}

#[derive(Debug, Clone)]
pub struct AnthropicRequestBuilder {
    settings: AnthropicSettings,
}

impl AnthropicRequestBuilder {
    pub fn new(settings: AnthropicSettings) -> Self {
        Self { settings }
    }

    fn request(
        &self,
        system: &str,
        messages: Vec<AnthropicMessage>,
        max_tokens: u32,
        stream: bool,
    ) -> Result<CompletionRequest> {
        if self.settings.model.is_empty() {
            return Err(RequestError::validation("Model must be specified"));
        }
        let caps = self.capabilities();
        Ok(CompletionRequest::Anthropic(AnthropicChatRequest {
            model: self.settings.model.clone(),
            system: system.to_string(),
            messages,
            max_tokens: caps.apply_max_tokens(max_tokens),
            stream: caps.apply_stream(stream),
        }))
    }
}

impl RequestBuilder for AnthropicRequestBuilder {
    fn capabilities(&self) -> BuilderCapabilities {
        BuilderCapabilities {
            max_output_tokens: Some(ANTHROPIC_MAX_OUTPUT_TOKENS),
            streaming: true,
        }
    }

    fn basic_completion_request(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        stream: bool,
    ) -> Result<CompletionRequest> {
        validate_prompts(system_prompt, user_prompt)?;
        self.request(
            system_prompt,
            conversation_messages(&[], user_prompt),
            max_tokens,
            stream,
        )
    }

    fn chat_request(&self, params: &ChatParameters) -> Result<CompletionRequest> {
        let prompt = prompt_with_files_context(params);
        self.request(
            PERSONA_SYSTEM_PROMPT,
            conversation_messages(&params.message.history, &prompt),
            ANTHROPIC_MAX_OUTPUT_TOKENS,
            true,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> AnthropicRequestBuilder {
        AnthropicRequestBuilder::new(
            AnthropicSettings::default().with_model("claude-3-5-sonnet-latest"),
        )
    }

    #[test]
    fn system_prompt_is_a_distinct_field() {
        let request = builder()
            .basic_completion_request("be terse", "hello", 512, true)
            .unwrap();
        let CompletionRequest::Anthropic(body) = request else {
            panic!("expected Anthropic-shaped request");
        };
        assert_eq!(body.system, "be terse");
        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].role, "user");
    }

    #[test]
    fn budgets_above_the_ceiling_are_clamped() {
        let request = builder()
            .basic_completion_request("sys", "user", 8192, true)
            .unwrap();
        assert_eq!(request.max_output_tokens(), Some(ANTHROPIC_MAX_OUTPUT_TOKENS));
    }
}
