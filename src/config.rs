//! Read-only mirrors of per-service persisted settings.
//!
//! The host application owns persistence (IDE settings store, config file,
//! whatever); this crate only reads a snapshot. Each backend has its own
//! section, and a section being absent means the service is not configured —
//! [`crate::factory::RequestFactory::resolve`] fails fast in that case rather
//! than guessing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::providers::llama_cpp::ChatTemplate;

/// Fill-in-the-middle prompt template preference for local code completion.
///
/// The FIM subsystem itself lives outside this crate; the preference is kept
/// here because it is part of the persisted settings sections for the local
/// inference servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InfillTemplate {
    #[default]
    CodeLlama,
    StableCode,
    DeepseekCoder,
}

/// Settings snapshot for every supported backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServiceSettings {
    pub platform: Option<PlatformSettings>,
    pub openai: Option<OpenAiSettings>,
    pub custom_openai: Option<CustomOpenAiSettings>,
    pub azure: Option<AzureSettings>,
    pub anthropic: Option<AnthropicSettings>,
    pub google: Option<GoogleSettings>,
    pub ollama: Option<OllamaSettings>,
    pub local_openai: Option<LocalOpenAiSettings>,
    pub llama_cpp: Option<LlamaCppSettings>,
}

/// Managed-platform settings (hosted gateway with its own model catalog).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlatformSettings {
    /// Model identifier selected from the platform catalog.
    pub model: String,
}

impl PlatformSettings {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Generic OpenAI settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OpenAiSettings {
    pub model: String,
}

impl OpenAiSettings {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Custom-endpoint OpenAI-compatible settings.
///
/// The request is template-driven: the persisted URL, header map, and body
/// map are carried into the produced request with `$API_KEY` placeholders in
/// header values substituted from the credential store.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CustomOpenAiSettings {
    /// Chat-completions endpoint URL.
    pub url: String,
    /// Header name → value template. Values may contain `$API_KEY`.
    pub headers: BTreeMap<String, String>,
    /// Extra body fields merged into the constructed request body. Core
    /// fields (`messages`, `stream`, `max_tokens`) always win over the
    /// template.
    pub body: serde_json::Map<String, serde_json::Value>,
}

impl CustomOpenAiSettings {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body_field(
        mut self,
        name: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        self.body.insert(name.into(), value);
        self
    }
}

/// Azure OpenAI settings. The deployment id and api-version address the
/// endpoint; the request body carries no model field.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AzureSettings {
    pub resource_name: String,
    pub deployment_id: String,
    pub api_version: String,
    /// `true` → api-key header auth; `false` → Active Directory bearer.
    pub use_api_key_auth: bool,
}

impl AzureSettings {
    pub fn with_resource_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = name.into();
        self
    }

    pub fn with_deployment_id(mut self, id: impl Into<String>) -> Self {
        self.deployment_id = id.into();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_api_key_auth(mut self, enabled: bool) -> Self {
        self.use_api_key_auth = enabled;
        self
    }
}

/// Anthropic Messages settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnthropicSettings {
    pub model: String,
}

impl AnthropicSettings {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Google Gemini settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GoogleSettings {
    pub model: String,
}

impl GoogleSettings {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Ollama settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaSettings {
    pub host: String,
    pub model: String,
    pub code_completions_enabled: bool,
    pub fim_template: InfillTemplate,
    /// Model tags last fetched from the host, for UI pickers. Opaque here.
    pub available_models: Vec<String>,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".to_string(),
            model: String::new(),
            code_completions_enabled: false,
            fim_template: InfillTemplate::default(),
            available_models: Vec::new(),
        }
    }
}

impl OllamaSettings {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Settings for the second local OpenAI-compatible inference server.
///
/// Same wire family as Ollama but configured independently, with a separate
/// completion model for code completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalOpenAiSettings {
    pub host: String,
    pub model: String,
    pub completion_model: Option<String>,
    pub code_completions_enabled: bool,
    pub fim_template: InfillTemplate,
    pub available_models: Vec<String>,
}

impl Default for LocalOpenAiSettings {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".to_string(),
            model: String::new(),
            completion_model: None,
            code_completions_enabled: false,
            fim_template: InfillTemplate::default(),
            available_models: Vec::new(),
        }
    }
}

impl LocalOpenAiSettings {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_completion_model(mut self, model: impl Into<String>) -> Self {
        self.completion_model = Some(model.into());
        self
    }
}

/// llama.cpp server settings. The server hosts a single loaded model, so
/// there is no model field; the chat template decides how the message list is
/// flattened into one text prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlamaCppSettings {
    pub host: String,
    pub chat_template: ChatTemplate,
}

impl Default for LlamaCppSettings {
    fn default() -> Self {
        Self {
            host: "http://localhost:8080".to_string(),
            chat_template: ChatTemplate::default(),
        }
    }
}

impl LlamaCppSettings {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_chat_template(mut self, template: ChatTemplate) -> Self {
        self.chat_template = template;
        self
    }
}
