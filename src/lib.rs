//! # Promptwire - Unified Completion-Request Construction
//!
//! Promptwire turns four completion intents — interactive chat, code-edit
//! instruction, commit-message generation, and short lookup-name generation —
//! into wire-ready request payloads for many LLM backends.
//!
#![deny(unsafe_code)]
//!
//! ## Design
//!
//! - **One seam per provider**: three intents are pure prompt composition and
//!   share default implementations; each backend implements only the basic
//!   completion primitive and its chat shape.
//! - **Closed dispatch**: [`ServiceKind`](factory::ServiceKind) is a closed
//!   enum and [`RequestFactory::resolve`](factory::RequestFactory::resolve)
//!   matches it exhaustively, so every identifier has exactly one builder.
//! - **Degrade, don't fail**: token budgets above a backend ceiling are
//!   clamped and unsupported streaming falls back to a complete response;
//!   only structural incompleteness (missing model, empty prompt) is an
//!   error.
//! - **Pure and synchronous**: no I/O, no shared mutable state. Builders are
//!   `Send + Sync` and deterministic; executing the produced request is the
//!   transport layer's job.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use promptwire::prelude::*;
//!
//! fn main() -> Result<(), RequestError> {
//!     let settings = ServiceSettings {
//!         anthropic: Some(AnthropicSettings::default().with_model("claude-3-5-sonnet-latest")),
//!         ..ServiceSettings::default()
//!     };
//!     let credentials = Arc::new(
//!         StaticCredentialStore::new().with_credential(CredentialKey::AnthropicApiKey, "sk-..."),
//!     );
//!
//!     let factory = RequestFactory::new(settings, credentials);
//!     let builder = factory.resolve(ServiceKind::Anthropic)?;
//!     let request = builder.edit_code_request(&EditCodeParameters::new(
//!         "def f(): pass",
//!         "add a docstring",
//!     ))?;
//!
//!     // Hand `request` to your transport layer.
//!     assert!(request.stream());
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod config;
pub mod credentials;
pub mod error;
pub mod factory;
pub mod prompts;
pub mod providers;
pub mod types;

pub use builder::{BuilderCapabilities, RequestBuilder};
pub use error::{RequestError, Result};
pub use factory::{RequestFactory, ServiceKind};

/// Common imports for consumers.
pub mod prelude {
    pub use crate::builder::{BuilderCapabilities, RequestBuilder};
    pub use crate::config::{
        AnthropicSettings, AzureSettings, CustomOpenAiSettings, GoogleSettings, LlamaCppSettings,
        LocalOpenAiSettings, OllamaSettings, OpenAiSettings, PlatformSettings, ServiceSettings,
    };
    pub use crate::credentials::{CredentialKey, CredentialStore, StaticCredentialStore};
    pub use crate::error::{RequestError, Result};
    pub use crate::factory::{RequestFactory, ServiceKind};
    pub use crate::types::{
        ChatParameters, CommitMessageParameters, CompletionRequest, ConversationMessage,
        EditCodeParameters, Exchange, FileReference, LookupParameters,
    };
}
