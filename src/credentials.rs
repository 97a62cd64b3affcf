//! Credential store seam.
//!
//! The host application owns credential persistence (OS keychain, IDE
//! password safe); this crate only reads values through [`CredentialStore`].
//! Secrets travel as [`secrecy::SecretString`] and are exposed at exactly one
//! point, where a header value is rendered.

use secrecy::SecretString;
use std::collections::HashMap;

/// Keys for the credentials this crate can consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    PlatformApiKey,
    OpenAiApiKey,
    CustomServiceApiKey,
    AzureOpenAiApiKey,
    AzureActiveDirectoryToken,
    AnthropicApiKey,
    GoogleApiKey,
}

/// Read-only credential lookup.
pub trait CredentialStore: Send + Sync {
    /// The stored credential for `key`, if any.
    fn credential(&self, key: CredentialKey) -> Option<SecretString>;

    /// Whether a non-empty credential is stored for `key`.
    fn is_credential_set(&self, key: CredentialKey) -> bool {
        use secrecy::ExposeSecret;
        self.credential(key)
            .is_some_and(|secret| !secret.expose_secret().is_empty())
    }
}

/// In-memory credential store.
///
/// The simplest useful implementation, suitable for tests and for hosts that
/// already hold decrypted credentials in memory.
#[derive(Default)]
pub struct StaticCredentialStore {
    values: HashMap<CredentialKey, SecretString>,
}

impl StaticCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(mut self, key: CredentialKey, value: impl Into<String>) -> Self {
        self.values.insert(key, SecretString::from(value.into()));
        self
    }
}

impl CredentialStore for StaticCredentialStore {
    fn credential(&self, key: CredentialKey) -> Option<SecretString> {
        self.values.get(&key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_credential_counts_as_unset() {
        let store = StaticCredentialStore::new().with_credential(CredentialKey::OpenAiApiKey, "");
        assert!(!store.is_credential_set(CredentialKey::OpenAiApiKey));
        assert!(!store.is_credential_set(CredentialKey::AnthropicApiKey));

        let store =
            StaticCredentialStore::new().with_credential(CredentialKey::OpenAiApiKey, "sk-x");
        assert!(store.is_credential_set(CredentialKey::OpenAiApiKey));
    }
}
