//! The request-builder abstraction shared by every backend.
//!
//! Three of the four intents (code edit, commit message, lookup) are pure
//! prompt composition and differ only in budgets and streaming, so they are
//! provided here in terms of the one abstract primitive,
//! [`RequestBuilder::basic_completion_request`]. Chat is not defaulted:
//! message-array shape, role conventions and model selection differ too much
//! across backends, and every provider supplies its own.

use crate::error::{RequestError, Result};
use crate::prompts::{EDIT_CODE_SYSTEM_PROMPT, LOOKUP_SYSTEM_PROMPT};
use crate::types::{
    ChatParameters, CommitMessageParameters, CompletionRequest, EditCodeParameters,
    LookupParameters,
};

/// Output-token budget for code-edit requests.
pub const EDIT_CODE_MAX_TOKENS: u32 = 8192;
/// Output-token budget for commit-message and lookup requests.
pub const SHORT_COMPLETION_MAX_TOKENS: u32 = 512;
/// Conventional budget for direct callers of the basic-completion primitive.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Fixed per-provider capability limits.
///
/// These are constants of the backend, not runtime state. Requests that
/// exceed them are degraded (clamped budget, streaming disabled), never
/// rejected: partial shaping beats total failure for this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderCapabilities {
    /// Fixed output-token ceiling, if the backend has one.
    pub max_output_tokens: Option<u32>,
    /// Whether the backend can stream completions for the selected model.
    pub streaming: bool,
}

impl Default for BuilderCapabilities {
    fn default() -> Self {
        Self {
            max_output_tokens: None,
            streaming: true,
        }
    }
}

impl BuilderCapabilities {
    /// Clamp a requested budget to the backend ceiling.
    pub fn apply_max_tokens(&self, requested: u32) -> u32 {
        match self.max_output_tokens {
            Some(ceiling) if requested > ceiling => {
                tracing::warn!(requested, ceiling, "clamping max tokens to provider ceiling");
                ceiling
            }
            _ => requested,
        }
    }

    /// Degrade a streaming request when the backend cannot stream.
    pub fn apply_stream(&self, requested: bool) -> bool {
        if requested && !self.streaming {
            tracing::warn!("streaming not supported here, degrading to complete response");
            return false;
        }
        requested
    }
}

/// Structural validation shared by the provider primitives.
///
/// Only completeness is checked; credential correctness and reachability
/// surface later, at transport time.
pub(crate) fn validate_prompts(system_prompt: &str, user_prompt: &str) -> Result<()> {
    if system_prompt.is_empty() {
        return Err(RequestError::validation("System prompt must not be empty"));
    }
    if user_prompt.is_empty() {
        return Err(RequestError::validation("User prompt must not be empty"));
    }
    Ok(())
}

/// Builds wire-ready requests for one backend.
///
/// Implementations are stateless beyond an immutable settings snapshot, so a
/// builder may be shared freely across threads and produces identical output
/// for identical input.
pub trait RequestBuilder: Send + Sync + std::fmt::Debug {
    /// Fixed limits of this backend for the configured model.
    fn capabilities(&self) -> BuilderCapabilities {
        BuilderCapabilities::default()
    }

    /// The single seam where provider-specific shaping happens: model field,
    /// payload envelope, token-field conventions.
    ///
    /// Implementations apply their own [`BuilderCapabilities`] before
    /// emitting the payload.
    fn basic_completion_request(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        stream: bool,
    ) -> Result<CompletionRequest>;

    /// Chat request for this backend. Never defaulted; see the module docs.
    fn chat_request(&self, params: &ChatParameters) -> Result<CompletionRequest>;

    /// Code-edit instruction request.
    ///
    /// Selected text and instruction are concatenated verbatim, with no
    /// escaping; callers sanitize if they need to.
    fn edit_code_request(&self, params: &EditCodeParameters) -> Result<CompletionRequest> {
        let prompt = format!(
            "Code to modify:\n{}\n\nInstructions: {}",
            params.selected_text, params.prompt
        );
        self.basic_completion_request(EDIT_CODE_SYSTEM_PROMPT, &prompt, EDIT_CODE_MAX_TOKENS, true)
    }

    /// Commit-message generation request: the caller's system prompt and the
    /// raw diff, both verbatim.
    fn commit_message_request(
        &self,
        params: &CommitMessageParameters,
    ) -> Result<CompletionRequest> {
        self.basic_completion_request(
            &params.system_prompt,
            &params.git_diff,
            SHORT_COMPLETION_MAX_TOKENS,
            true,
        )
    }

    /// Short lookup-name generation request. Never streamed: the result is a
    /// single short identifier consumed whole.
    fn lookup_request(&self, params: &LookupParameters) -> Result<CompletionRequest> {
        self.basic_completion_request(
            LOOKUP_SYSTEM_PROMPT,
            &params.prompt,
            SHORT_COMPLETION_MAX_TOKENS,
            false,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_only_above_the_ceiling() {
        let caps = BuilderCapabilities {
            max_output_tokens: Some(4096),
            streaming: true,
        };
        assert_eq!(caps.apply_max_tokens(8192), 4096);
        assert_eq!(caps.apply_max_tokens(512), 512);

        let unlimited = BuilderCapabilities::default();
        assert_eq!(unlimited.apply_max_tokens(8192), 8192);
    }

    #[test]
    fn streaming_degrades_instead_of_failing() {
        let caps = BuilderCapabilities {
            max_output_tokens: None,
            streaming: false,
        };
        assert!(!caps.apply_stream(true));
        assert!(!caps.apply_stream(false));
    }

    #[test]
    fn prompt_validation_requires_both_prompts() {
        assert!(validate_prompts("system", "user").is_ok());
        assert!(validate_prompts("", "user").is_err());
        assert!(validate_prompts("system", "").is_err());
    }
}
