//! Custom-endpoint OpenAI-compatible builder.
//!
//! The only backend whose produced request carries its own URL and headers:
//! everything is driven by the persisted endpoint template. `$API_KEY`
//! placeholders in header values are substituted with the stored credential
//! at construction time; a header whose value needs the placeholder is
//! dropped when no credential is stored, so the placeholder never reaches
//! the wire.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::builder::{RequestBuilder, validate_prompts};
use crate::config::CustomOpenAiSettings;
use crate::error::{RequestError, Result};
use crate::prompts::{PERSONA_SYSTEM_PROMPT, prompt_with_files_context};
use crate::providers::openai::{OpenAiMessage, conversation_messages};
use crate::types::{ChatParameters, CompletionRequest};

/// Placeholder recognized in persisted header values.
const API_KEY_PLACEHOLDER: &str = "$API_KEY";

/// Fully addressed request: URL, headers, and JSON body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomOpenAiRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct CustomOpenAiRequestBuilder {
    settings: CustomOpenAiSettings,
    api_key: Option<SecretString>,
}

impl CustomOpenAiRequestBuilder {
    pub fn new(settings: CustomOpenAiSettings, api_key: Option<SecretString>) -> Self {
        Self { settings, api_key }
    }

    /// Render the persisted header templates, substituting the credential.
    fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        for (name, value) in &self.settings.headers {
            if value.contains(API_KEY_PLACEHOLDER) {
                match &self.api_key {
                    Some(key) => {
                        headers.insert(
                            name.clone(),
                            value.replace(API_KEY_PLACEHOLDER, key.expose_secret()),
                        );
                    }
                    None => {
                        tracing::debug!(header = %name, "no credential stored, dropping header");
                    }
                }
            } else {
                headers.insert(name.clone(), value.clone());
            }
        }
        headers
    }

    fn request(
        &self,
        messages: Vec<OpenAiMessage>,
        max_tokens: Option<u32>,
        stream: bool,
    ) -> Result<CompletionRequest> {
        if self.settings.url.is_empty() {
            return Err(RequestError::validation("Endpoint URL must be specified"));
        }
        let caps = self.capabilities();
        let stream = caps.apply_stream(stream);

        // Template fields first; constructed fields always win.
        let mut body = self.settings.body.clone();
        body.insert(
            "messages".to_string(),
            serde_json::to_value(&messages).unwrap_or_default(),
        );
        body.insert("stream".to_string(), serde_json::Value::from(stream));
        if let Some(max) = max_tokens {
            body.insert(
                "max_tokens".to_string(),
                serde_json::Value::from(caps.apply_max_tokens(max)),
            );
        }

        Ok(CompletionRequest::CustomOpenAi(CustomOpenAiRequest {
            url: self.settings.url.clone(),
            headers: self.headers(),
            body: serde_json::Value::Object(body),
        }))
    }
}

impl RequestBuilder for CustomOpenAiRequestBuilder {
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
