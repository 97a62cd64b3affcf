//! Generic OpenAI builder and the shared chat-completions wire types.
//!
//! Several backends speak this dialect (Azure, Ollama, the second local
//! server, the managed platform); they reuse [`OpenAiMessage`] and
//! [`OpenAiChatRequest`] with their own model/endpoint conventions.

use serde::{Deserialize, Serialize};

use crate::builder::{BuilderCapabilities, RequestBuilder, validate_prompts};
use crate::config::OpenAiSettings;
use crate::error::{RequestError, Result};
use crate::prompts::{PERSONA_SYSTEM_PROMPT, prompt_with_files_context};
use crate::types::{ChatParameters, CompletionRequest, Exchange};

/// Reasoning models that reject the `max_tokens` field and cannot stream.
const REASONING_MODELS: [&str; 2] = ["o1-mini", "o1-preview"];

pub(crate) fn is_reasoning_model(model: &str) -> bool {
    REASONING_MODELS.contains(&model)
}

/// One chat-completions message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpenAiMessage {
    pub role: String,
    pub content: String,
}

impl OpenAiMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

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

/// OpenAI chat-completions request body.
///
/// `model` is optional because Azure addresses the model through the
/// deployment path instead of the body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpenAiChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    pub stream: bool,
}

/// Assemble the message array for a conversation: system channel first, then
/// completed exchanges oldest-first, then the final user prompt.
pub(crate) fn conversation_messages(
    system_prompt: &str,
    history: &[Exchange],
    user_prompt: &str,
) -> Vec<OpenAiMessage> {
    let mut messages = Vec::with_capacity(history.len() * 2 + 2);
    messages.push(OpenAiMessage::system(system_prompt));
    for exchange in history {
        messages.push(OpenAiMessage::user(&exchange.prompt));
        messages.push(OpenAiMessage::assistant(&exchange.response));
    }
    messages.push(OpenAiMessage::user(user_prompt));
    messages
}

/// Builder for the generic OpenAI backend.
#[derive(Debug, Clone)]
pub struct OpenAiRequestBuilder {
    settings: OpenAiSettings,
}

impl OpenAiRequestBuilder {
    pub fn new(settings: OpenAiSettings) -> Self {
        Self { settings }
    }

    fn validated_model(&self) -> Result<&str> {
        if self.settings.model.is_empty() {
            return Err(RequestError::validation("Model must be specified"));
        }
        Ok(&self.settings.model)
    }

    fn request(
        &self,
        messages: Vec<OpenAiMessage>,
        max_tokens: Option<u32>,
        stream: bool,
    ) -> Result<CompletionRequest> {
        let model = self.validated_model()?;
        let caps = self.capabilities();
        let stream = caps.apply_stream(stream);
        // Reasoning models take the budget through max_completion_tokens.
        let (max_tokens, max_completion_tokens) = if is_reasoning_model(model) {
            (None, max_tokens.map(|m| caps.apply_max_tokens(m)))
        } else {
            (max_tokens.map(|m| caps.apply_max_tokens(m)), None)
        };
        Ok(CompletionRequest::OpenAi(OpenAiChatRequest {
            model: Some(model.to_string()),
            messages,
            max_tokens,
            max_completion_tokens,
            stream,
        }))
    }
}

impl RequestBuilder for OpenAiRequestBuilder {
    fn capabilities(&self) -> BuilderCapabilities {
        BuilderCapabilities {
            max_output_tokens: None,
            streaming: !is_reasoning_model(&self.settings.model),
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
            conversation_messages(system_prompt, &[], user_prompt),
            Some(max_tokens),
            stream,
        )
    }

    fn chat_request(&self, params: &ChatParameters) -> Result<CompletionRequest> {
        let prompt = prompt_with_files_context(params);
        self.request(
            conversation_messages(PERSONA_SYSTEM_PROMPT, &params.message.history, &prompt),
            None,
            true,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasoning_models_are_detected() {
        assert!(is_reasoning_model("o1-mini"));
        assert!(is_reasoning_model("o1-preview"));
        assert!(!is_reasoning_model("gpt-4o"));
    }

    #[test]
    fn conversation_messages_interleave_history() {
        let history = vec![Exchange::new("first", "answer")];
        let messages = conversation_messages("sys", &history, "second");
        let roles: Vec<&str> = messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, ["system", "user", "assistant", "user"]);
        assert_eq!(messages[3].content, "second");
    }

    #[test]
    fn missing_model_is_a_validation_error() {
        let builder = OpenAiRequestBuilder::new(OpenAiSettings::default());
        let err = builder
            .basic_completion_request("sys", "user", 512, false)
            .unwrap_err();
        assert!(matches!(err, RequestError::ValidationError(_)));
    }
}
