//! Azure OpenAI builder.
//!
//! Same wire dialect as OpenAI, but the model is addressed through the
//! deployment path (resource name + deployment id + api-version, all in
//! settings), so the body carries no model field. Whether the transport
//! authenticates with an api-key header or an Active Directory bearer is a
//! settings flag; this crate only shapes the payload.

use crate::builder::{RequestBuilder, validate_prompts};
use crate::config::AzureSettings;
use crate::error::{RequestError, Result};
use crate::prompts::{PERSONA_SYSTEM_PROMPT, prompt_with_files_context};
use crate::providers::openai::{OpenAiChatRequest, OpenAiMessage, conversation_messages};
use crate::types::{ChatParameters, CompletionRequest};

#[derive(Debug, Clone)]
pub struct AzureRequestBuilder {
    settings: AzureSettings,
}

impl AzureRequestBuilder {
    pub fn new(settings: AzureSettings) -> Self {
        Self { settings }
    }

    fn request(
        &self,
        messages: Vec<OpenAiMessage>,
        max_tokens: Option<u32>,
        stream: bool,
    ) -> Result<CompletionRequest> {
        if self.settings.deployment_id.is_empty() {
            return Err(RequestError::validation(
                "Azure deployment id must be specified",
            ));
        }
        let caps = self.capabilities();
        Ok(CompletionRequest::OpenAi(OpenAiChatRequest {
            model: None,
            messages,
            max_tokens: max_tokens.map(|m| caps.apply_max_tokens(m)),
            max_completion_tokens: None,
            stream: caps.apply_stream(stream),
        }))
    }
}

impl RequestBuilder for AzureRequestBuilder {
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
