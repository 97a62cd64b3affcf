//! The produced request value.
//!
//! There is no single wire schema: each backend family has its own shape,
//! and the enum keys them. The contract toward the transport layer is only
//! that a returned value is fully formed — every field the provider requires
//! is populated, nothing is a placeholder.

use crate::providers::anthropic::AnthropicChatRequest;
use crate::providers::custom_openai::CustomOpenAiRequest;
use crate::providers::google::GoogleChatRequest;
use crate::providers::llama_cpp::LlamaCompletionRequest;
use crate::providers::openai::OpenAiChatRequest;
use crate::providers::platform::PlatformChatRequest;

/// A wire-ready completion request, keyed by payload family.
///
/// OpenAI-compatible backends (OpenAI, Azure, the local inference servers)
/// share the [`OpenAiChatRequest`] shape; the consumer routes the value to
/// the endpoint belonging to the service it resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionRequest {
    OpenAi(OpenAiChatRequest),
    CustomOpenAi(CustomOpenAiRequest),
    Anthropic(AnthropicChatRequest),
    Google(GoogleChatRequest),
    LlamaCpp(LlamaCompletionRequest),
    Platform(PlatformChatRequest),
}

impl CompletionRequest {
    /// Whether the consumer should request incremental delivery.
    pub fn stream(&self) -> bool {
        match self {
            Self::OpenAi(r) => r.stream,
            Self::CustomOpenAi(r) => r
                .body
                .get("stream")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false),
            Self::Anthropic(r) => r.stream,
            Self::Google(r) => r.stream,
            Self::LlamaCpp(r) => r.stream,
            Self::Platform(r) => r.stream,
        }
    }

    /// The output-token budget carried by the payload, if any.
    pub fn max_output_tokens(&self) -> Option<u32> {
        match self {
            Self::OpenAi(r) => r.max_tokens.or(r.max_completion_tokens),
            Self::CustomOpenAi(r) => r
                .body
                .get("max_tokens")
                .and_then(serde_json::Value::as_u64)
                .map(|v| v as u32),
            Self::Anthropic(r) => Some(r.max_tokens),
            Self::Google(r) => r.generation_config.as_ref().and_then(|c| c.max_output_tokens),
            Self::LlamaCpp(r) => r.n_predict,
            Self::Platform(r) => r.max_tokens,
        }
    }

    /// The system instructions as the payload conveys them, if the payload
    /// keeps them addressable (the llama.cpp prompt is already flattened).
    pub fn system_prompt(&self) -> Option<&str> {
        match self {
            Self::OpenAi(r) => r
                .messages
                .iter()
                .find(|m| m.role == "system")
                .map(|m| m.content.as_str()),
            Self::CustomOpenAi(r) => r
                .body
                .get("messages")
                .and_then(serde_json::Value::as_array)
                .and_then(|messages| {
                    messages
                        .iter()
                        .find(|m| m.get("role").and_then(serde_json::Value::as_str) == Some("system"))
                })
                .and_then(|m| m.get("content"))
                .and_then(serde_json::Value::as_str),
            Self::Anthropic(r) => Some(r.system.as_str()),
            Self::Google(r) => r.contents.first().and_then(|c| c.parts.first()).map(|p| p.text.as_str()),
            Self::LlamaCpp(_) => None,
            Self::Platform(r) => r
                .messages
                .iter()
                .find(|m| m.role == "system")
                .map(|m| m.content.as_str()),
        }
    }

    /// The final user prompt as the payload conveys it, if addressable.
    pub fn user_prompt(&self) -> Option<&str> {
        match self {
            Self::OpenAi(r) => r
                .messages
                .iter()
                .rev()
                .find(|m| m.role == "user")
                .map(|m| m.content.as_str()),
            Self::CustomOpenAi(r) => r
                .body
                .get("messages")
                .and_then(serde_json::Value::as_array)
                .and_then(|messages| {
                    messages
                        .iter()
                        .rev()
                        .find(|m| m.get("role").and_then(serde_json::Value::as_str) == Some("user"))
                })
                .and_then(|m| m.get("content"))
                .and_then(serde_json::Value::as_str),
            Self::Anthropic(r) => r
                .messages
                .iter()
                .rev()
                .find(|m| m.role == "user")
                .map(|m| m.content.as_str()),
            Self::Google(r) => r
                .contents
                .iter()
                .rev()
                .find(|c| c.role == "user")
                .and_then(|c| c.parts.first())
                .map(|p| p.text.as_str()),
            Self::LlamaCpp(_) => None,
            Self::Platform(r) => r
                .messages
                .iter()
                .rev()
                .find(|m| m.role == "user")
                .map(|m| m.content.as_str()),
        }
    }
}
