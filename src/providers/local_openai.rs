//! Builder for the second local OpenAI-compatible inference server.
//!
//! Same wire dialect as Ollama, configured through its own settings section
//! so users can run both hosts side by side with different models.

use crate::builder::{RequestBuilder, validate_prompts};
use crate::config::LocalOpenAiSettings;
use crate::error::{RequestError, Result};
use crate::prompts::{PERSONA_SYSTEM_PROMPT, prompt_with_files_context};
use crate::providers::openai::{OpenAiChatRequest, OpenAiMessage, conversation_messages};
use crate::types::{ChatParameters, CompletionRequest};

#[derive(Debug, Clone)]
pub struct LocalOpenAiRequestBuilder {
    settings: LocalOpenAiSettings,
}

impl LocalOpenAiRequestBuilder {
    pub fn new(settings: LocalOpenAiSettings) -> Self {
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

impl RequestBuilder for LocalOpenAiRequestBuilder {
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
