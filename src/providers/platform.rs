//! Managed-platform builder.
//!
//! The hosted gateway speaks an OpenAI-flavored dialect with one addition:
//! a session id, so the gateway can thread conversation turns server-side.
//! The bearer credential lives in the credential store and is attached by
//! the transport; this builder only shapes the payload.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::builder::{RequestBuilder, validate_prompts};
use crate::config::PlatformSettings;
use crate::error::{RequestError, Result};
use crate::prompts::{PERSONA_SYSTEM_PROMPT, prompt_with_files_context};
use crate::providers::openai::{OpenAiMessage, conversation_messages};
use crate::types::{ChatParameters, CompletionRequest};

/// Platform chat request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlatformChatRequest {
    pub model: String,
    pub messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub stream: bool,
    /// Conversation thread id, forwarded so the gateway can join turns.
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct PlatformRequestBuilder {
    settings: PlatformSettings,
}

impl PlatformRequestBuilder {
    pub fn new(settings: PlatformSettings) -> Self {
        Self { settings }
    }

    fn request(
        &self,
        messages: Vec<OpenAiMessage>,
        max_tokens: Option<u32>,
        stream: bool,
        session_id: Option<Uuid>,
    ) -> Result<CompletionRequest> {
        if self.settings.model.is_empty() {
            return Err(RequestError::validation("Model must be specified"));
        }
        let caps = self.capabilities();
        Ok(CompletionRequest::Platform(PlatformChatRequest {
            model: self.settings.model.clone(),
            messages,
            max_tokens: max_tokens.map(|m| caps.apply_max_tokens(m)),
            stream: caps.apply_stream(stream),
            session_id,
        }))
    }
}

impl RequestBuilder for PlatformRequestBuilder {
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
            None,
        )
    }

    fn chat_request(&self, params: &ChatParameters) -> Result<CompletionRequest> {
        let prompt = prompt_with_files_context(params);
        self.request(
            conversation_messages(PERSONA_SYSTEM_PROMPT, &params.message.history, &prompt),
            None,
            true,
            Some(params.conversation_id),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConversationMessage;

    #[test]
    fn chat_requests_carry_the_conversation_id() {
        let builder =
            PlatformRequestBuilder::new(PlatformSettings::default().with_model("gpt-4o"));
        let id = Uuid::new_v4();
        let params =
            ChatParameters::new(ConversationMessage::new("hello")).with_conversation_id(id);
        let request = builder.chat_request(&params).unwrap();
        let CompletionRequest::Platform(body) = request else {
            panic!("expected platform request");
        };
        assert_eq!(body.session_id, Some(id));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["sessionId"], serde_json::json!(id));
    }

    #[test]
    fn intent_requests_have_no_session() {
        let builder =
            PlatformRequestBuilder::new(PlatformSettings::default().with_model("gpt-4o"));
        let request = builder
            .basic_completion_request("sys", "user", 512, true)
            .unwrap();
        let CompletionRequest::Platform(body) = request else {
            panic!("expected platform request");
        };
        assert_eq!(body.session_id, None);
    }
}
