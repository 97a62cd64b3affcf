//! Service identifiers and the builder dispatch point.

use std::sync::Arc;

use crate::builder::RequestBuilder;
use crate::config::ServiceSettings;
use crate::credentials::{CredentialKey, CredentialStore};
use crate::error::{RequestError, Result};
use crate::providers::anthropic::AnthropicRequestBuilder;
use crate::providers::azure::AzureRequestBuilder;
use crate::providers::custom_openai::CustomOpenAiRequestBuilder;
use crate::providers::google::GoogleRequestBuilder;
use crate::providers::llama_cpp::LlamaCppRequestBuilder;
use crate::providers::local_openai::LocalOpenAiRequestBuilder;
use crate::providers::ollama::OllamaRequestBuilder;
use crate::providers::openai::OpenAiRequestBuilder;
use crate::providers::platform::PlatformRequestBuilder;

/// Closed enumeration of the supported backends.
///
/// Dispatch over this enum is exhaustive: adding a variant without wiring a
/// builder is a compile error, so every identifier always has exactly one
/// builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    /// Managed-platform default (hosted gateway).
    Platform,
    /// Generic OpenAI.
    OpenAi,
    /// Custom-endpoint OpenAI-compatible service.
    CustomOpenAi,
    /// Azure OpenAI.
    Azure,
    /// Anthropic Messages.
    Anthropic,
    /// Google Gemini.
    Google,
    /// Local Ollama host.
    Ollama,
    /// Second local OpenAI-compatible inference server.
    LocalOpenAi,
    /// Self-hosted llama.cpp server.
    LlamaCpp,
}

impl ServiceKind {
    /// Every supported service, in display order.
    pub const ALL: [ServiceKind; 9] = [
        Self::Platform,
        Self::OpenAi,
        Self::CustomOpenAi,
        Self::Azure,
        Self::Anthropic,
        Self::Google,
        Self::Ollama,
        Self::LocalOpenAi,
        Self::LlamaCpp,
    ];

    /// Parse a persisted identifier string.
    ///
    /// Unknown names are a configuration fault and are rejected, never
    /// mapped to a fallback service.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "platform" => Ok(Self::Platform),
            "openai" => Ok(Self::OpenAi),
            "custom_openai" => Ok(Self::CustomOpenAi),
            "azure" => Ok(Self::Azure),
            "anthropic" => Ok(Self::Anthropic),
            "google" => Ok(Self::Google),
            "ollama" => Ok(Self::Ollama),
            "local_openai" => Ok(Self::LocalOpenAi),
            "llama_cpp" => Ok(Self::LlamaCpp),
            other => Err(RequestError::configuration(format!(
                "Unknown service identifier: {other}"
            ))),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Platform => "platform",
            Self::OpenAi => "openai",
            Self::CustomOpenAi => "custom_openai",
            Self::Azure => "azure",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::Ollama => "ollama",
            Self::LocalOpenAi => "local_openai",
            Self::LlamaCpp => "llama_cpp",
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ServiceKind {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// Resolves a service identifier to its request builder.
///
/// The factory owns a read-only settings snapshot and a credential-store
/// handle; resolved builders capture an immutable slice of each, so two
/// resolutions of the same kind behave identically.
pub struct RequestFactory {
    settings: ServiceSettings,
    credentials: Arc<dyn CredentialStore>,
}

impl RequestFactory {
    pub fn new(settings: ServiceSettings, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            settings,
            credentials,
        }
    }

    /// The builder for `kind`.
    ///
    /// Fails fast with a configuration error when the settings section for
    /// the requested service is absent — a missing section is a wiring
    /// fault, not something to paper over with defaults.
    pub fn resolve(&self, kind: ServiceKind) -> Result<Box<dyn RequestBuilder>> {
        fn section<T: Clone>(section: &Option<T>, kind: ServiceKind) -> Result<T> {
            section.clone().ok_or_else(|| {
                RequestError::configuration(format!("Service '{kind}' is not configured"))
            })
        }

        tracing::debug!(service = %kind, "resolving request builder");
        match kind {
            ServiceKind::Platform => Ok(Box::new(PlatformRequestBuilder::new(section(
                &self.settings.platform,
                kind,
            )?))),
            ServiceKind::OpenAi => Ok(Box::new(OpenAiRequestBuilder::new(section(
                &self.settings.openai,
                kind,
            )?))),
            ServiceKind::CustomOpenAi => Ok(Box::new(CustomOpenAiRequestBuilder::new(
                section(&self.settings.custom_openai, kind)?,
                self.credentials.credential(CredentialKey::CustomServiceApiKey),
            ))),
            ServiceKind::Azure => Ok(Box::new(AzureRequestBuilder::new(section(
                &self.settings.azure,
                kind,
            )?))),
            ServiceKind::Anthropic => Ok(Box::new(AnthropicRequestBuilder::new(section(
                &self.settings.anthropic,
                kind,
            )?))),
            ServiceKind::Google => Ok(Box::new(GoogleRequestBuilder::new(section(
                &self.settings.google,
                kind,
            )?))),
            ServiceKind::Ollama => Ok(Box::new(OllamaRequestBuilder::new(section(
                &self.settings.ollama,
                kind,
            )?))),
            ServiceKind::LocalOpenAi => Ok(Box::new(LocalOpenAiRequestBuilder::new(section(
                &self.settings.local_openai,
                kind,
            )?))),
            ServiceKind::LlamaCpp => Ok(Box::new(LlamaCppRequestBuilder::new(section(
                &self.settings.llama_cpp,
                kind,
            )?))),
        }
    }

    /// Whether the selected service has the credential it needs.
    ///
    /// Local and template-driven services work without a stored key; the
    /// platform attaches its credential at transport time and is likewise
    /// always allowed.
    pub fn is_request_allowed(&self, kind: ServiceKind) -> bool {
        match kind {
            ServiceKind::OpenAi => self
                .credentials
                .is_credential_set(CredentialKey::OpenAiApiKey),
            ServiceKind::Azure => {
                let key = match &self.settings.azure {
                    Some(azure) if azure.use_api_key_auth => CredentialKey::AzureOpenAiApiKey,
                    Some(_) => CredentialKey::AzureActiveDirectoryToken,
                    None => return false,
                };
                self.credentials.is_credential_set(key)
            }
            ServiceKind::Anthropic => self
                .credentials
                .is_credential_set(CredentialKey::AnthropicApiKey),
            ServiceKind::Google => self
                .credentials
                .is_credential_set(CredentialKey::GoogleApiKey),
            ServiceKind::Platform
            | ServiceKind::CustomOpenAi
            | ServiceKind::Ollama
            | ServiceKind::LocalOpenAi
            | ServiceKind::LlamaCpp => true,
        }
    }
}

static_assertions::assert_impl_all!(RequestFactory: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::StaticCredentialStore;

    #[test]
    fn unknown_identifier_strings_are_rejected() {
        let err = ServiceKind::from_name("frobnicator").unwrap_err();
        assert!(matches!(err, RequestError::ConfigurationError(_)));
    }

    #[test]
    fn every_kind_round_trips_through_its_name() {
        for kind in ServiceKind::ALL {
            assert_eq!(ServiceKind::from_name(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn unconfigured_service_fails_fast() {
        let factory = RequestFactory::new(
            ServiceSettings::default(),
            Arc::new(StaticCredentialStore::new()),
        );
        let err = factory.resolve(ServiceKind::Anthropic).unwrap_err();
        assert!(matches!(err, RequestError::ConfigurationError(_)));
    }

    #[test]
    fn key_requiring_services_need_a_stored_credential() {
        let factory = RequestFactory::new(
            ServiceSettings::default(),
            Arc::new(
                StaticCredentialStore::new()
                    .with_credential(CredentialKey::AnthropicApiKey, "sk-ant"),
            ),
        );
        assert!(factory.is_request_allowed(ServiceKind::Anthropic));
        assert!(!factory.is_request_allowed(ServiceKind::OpenAi));
        assert!(factory.is_request_allowed(ServiceKind::Ollama));
        assert!(factory.is_request_allowed(ServiceKind::Platform));
    }
}
