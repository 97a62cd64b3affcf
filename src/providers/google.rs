//! Google Gemini GenerateContent builder.
//!
//! Gemini has no distinct system-prompt channel on this wire: the system
//! prompt is prepended to `contents` as a user turn acknowledged by a fixed
//! model turn, so system instructions are never dropped. The streaming flag
//! is not part of the body either — the transport picks the
//! `generateContent` vs `streamGenerateContent` endpoint from it.

use serde::{Deserialize, Serialize};

use crate::builder::{RequestBuilder, validate_prompts};
use crate::config::GoogleSettings;
use crate::error::{RequestError, Result};
use crate::prompts::{PERSONA_SYSTEM_PROMPT, prompt_with_files_context};
use crate::types::{ChatParameters, CompletionRequest, Exchange};

/// Fixed model turn acknowledging the prepended system prompt.
const SYSTEM_ACK: &str = "Understood.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GooglePart {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoogleContent {
    pub role: String,
    pub parts: Vec<GooglePart>,
}

impl GoogleContent {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![GooglePart { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            parts: vec![GooglePart { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoogleGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// GenerateContent request body.
///
/// `model` and `stream` address the endpoint path rather than the body, so
/// both are skipped during serialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GoogleChatRequest {
    #[serde(skip)]
    pub model: String,
    pub contents: Vec<GoogleContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GoogleGenerationConfig>,
    #[serde(skip)]
    pub stream: bool,
}

/// System prompt as a leading user/model pair, then history, then the final
/// user prompt.
fn conversation_contents(
    system_prompt: &str,
    history: &[Exchange],
    user_prompt: &str,
) -> Vec<GoogleContent> {
    let mut contents = Vec::with_capacity(history.len() * 2 + 3);
    contents.push(GoogleContent::user(system_prompt));
    contents.push(GoogleContent::model(SYSTEM_ACK));
    for exchange in history {
        contents.push(GoogleContent::user(&exchange.prompt));
        contents.push(GoogleContent::model(&exchange.response));
    }
    contents.push(GoogleContent::user(user_prompt));
    contents
}

#[derive(Debug, Clone)]
pub struct GoogleRequestBuilder {
    settings: GoogleSettings,
}

impl GoogleRequestBuilder {
    pub fn new(settings: GoogleSettings) -> Self {
        Self { settings }
    }

    fn request(
        &self,
        contents: Vec<GoogleContent>,
        max_tokens: Option<u32>,
        stream: bool,
    ) -> Result<CompletionRequest> {
        if self.settings.model.is_empty() {
            return Err(RequestError::validation("Model must be specified"));
        }
        let caps = self.capabilities();
        Ok(CompletionRequest::Google(GoogleChatRequest {
            model: self.settings.model.clone(),
            contents,
            generation_config: max_tokens.map(|m| GoogleGenerationConfig {
                max_output_tokens: Some(caps.apply_max_tokens(m)),
            }),
            stream: caps.apply_stream(stream),
        }))
    }
}

impl RequestBuilder for GoogleRequestBuilder {
    fn basic_completion_request(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        stream: bool,
    ) -> Result<CompletionRequest> {
        validate_prompts(system_prompt, user_prompt)?;
        self.request(
            conversation_contents(system_prompt, &[], user_prompt),
            Some(max_tokens),
            stream,
        )
    }

    fn chat_request(&self, params: &ChatParameters) -> Result<CompletionRequest> {
        let prompt = prompt_with_files_context(params);
        self.request(
            conversation_contents(PERSONA_SYSTEM_PROMPT, &params.message.history, &prompt),
            None,
            true,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_is_prepended_and_acknowledged() {
        let contents = conversation_contents("sys", &[], "hello");
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0].role, "user");
        assert_eq!(contents[0].parts[0].text, "sys");
        assert_eq!(contents[1].role, "model");
        assert_eq!(contents[1].parts[0].text, SYSTEM_ACK);
        assert_eq!(contents[2].parts[0].text, "hello");
    }

    #[test]
    fn model_and_stream_stay_out_of_the_body() {
        let builder =
            GoogleRequestBuilder::new(GoogleSettings::default().with_model("gemini-2.0-flash"));
        let request = builder
            .basic_completion_request("sys", "user", 512, true)
            .unwrap();
        let CompletionRequest::Google(body) = request else {
            panic!("expected Google-shaped request");
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("model").is_none());
        assert!(json.get("stream").is_none());
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 512);
    }
}
