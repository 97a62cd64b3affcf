//! Ollama builder.
//!
//! Talks the OpenAI-compatible chat endpoint exposed by a local Ollama host.
//! The host itself is transport configuration; the body carries the model tag
//! selected in settings.

use crate::builder::{RequestBuilder, validate_prompts};
use crate::config::OllamaSettings;
use crate::error::{RequestError, Result};
use crate::prompts::{PERSONA_SYSTEM_PROMPT, prompt_with_files_context};
use crate::providers::openai::{OpenAiChatRequest, OpenAiMessage, conversation_messages};
use crate::types::{ChatParameters, CompletionRequest};

#[derive(Debug, Clone)]
pub struct OllamaRequestBuilder {
    settings: OllamaSettings,
}

impl OllamaRequestBuilder {
    pub fn new(settings: OllamaSettings) -> Self {
        Self { settings }
    }

    fn request(
        &self,
        messages: Vec<OpenAiMessage>,
        max_tokens: Option<u32>,
        stream: bool,
    ) -> Result<CompletionRequest> {
        if self.settings.model.is_empty() {
            return Err(RequestError::validation("Model must be specified"));
        }
        let caps = self.capabilities();
        Ok(CompletionRequest::OpenAi(OpenAiChatRequest {
            model: Some(self.settings.model.clone()),
            messages,
            max_tokens: max_tokens.map(|m| caps.apply_max_tokens(m)),
            max_completion_tokens: None,
            stream: caps.apply_stream(stream),
        }))
    }
}

impl RequestBuilder for OllamaRequestBuilder {
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
