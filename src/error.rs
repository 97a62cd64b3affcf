//! Error handling types for promptwire.
//!
//! Request construction can only fail in two ways: the caller asked for a
//! service that is not configured, or a required field was missing when the
//! request was assembled. Transport-level failures (auth, network, malformed
//! responses) are the consumer's concern and have no representation here.

use thiserror::Error;

/// Errors raised while constructing a completion request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Unknown service identifier or missing settings section.
    ///
    /// This is a caller programming/configuration fault and is never silently
    /// defaulted away.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A structurally required field (model, deployment, prompt) was absent
    /// at request-construction time.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl RequestError {
    /// Configuration error with a formatted message.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Validation error with a formatted message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}

/// Convenience result alias used across the crate.
pub type Result<T> = std::result::Result<T, RequestError>;
