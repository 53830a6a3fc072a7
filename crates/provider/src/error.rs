use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by a backend while reaching the provider.
///
/// Probes hand these back to the caller untouched; they are never cached.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No backend is registered for the requested resource kind.
    #[error("no backend registered for resource kind: {0}")]
    NotFound(String),

    /// The provider rejected or failed the request.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The provider did not respond within the allowed duration.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// A network or transport-level error occurred.
    #[error("connection error: {0}")]
    Connection(String),

    /// The backend was given invalid configuration or credentials.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The provider rejected the request due to rate limiting.
    #[error("rate limited")]
    RateLimited,

    /// A provider response could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ProviderError {
    /// Returns `true` if the error is transient and a later read may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::Connection(_) | Self::RateLimited
        )
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
