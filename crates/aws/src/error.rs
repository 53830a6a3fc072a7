use std::time::Duration;

use thiserror::Error;
use vigil_provider::ProviderError;

/// Errors specific to AWS backend calls.
#[derive(Debug, Error)]
pub enum AwsProviderError {
    /// The AWS SDK returned an error from the service.
    #[error("AWS service error: {0}")]
    ServiceError(String),

    /// The request was throttled by the AWS service.
    #[error("AWS request throttled")]
    Throttled,

    /// A network or connection error occurred communicating with AWS.
    #[error("AWS connection error: {0}")]
    Connection(String),

    /// The operation timed out.
    #[error("AWS request timed out after {0:?}")]
    Timeout(Duration),

    /// The caller is not allowed to describe the resource.
    #[error("AWS access denied: {0}")]
    AccessDenied(String),

    /// AWS credential resolution failed or credentials expired.
    #[error("credential error: {0}")]
    CredentialError(String),

    /// The backend configuration is unusable.
    #[error("invalid AWS configuration: {0}")]
    InvalidConfig(String),
}

impl From<AwsProviderError> for ProviderError {
    fn from(err: AwsProviderError) -> Self {
        match err {
            AwsProviderError::ServiceError(msg) => ProviderError::ExecutionFailed(msg),
            AwsProviderError::Throttled => ProviderError::RateLimited,
            AwsProviderError::Connection(msg) => ProviderError::Connection(msg),
            AwsProviderError::Timeout(after) => ProviderError::Timeout(after),
            AwsProviderError::AccessDenied(msg)
            | AwsProviderError::CredentialError(msg)
            | AwsProviderError::InvalidConfig(msg) => {
                ProviderError::Configuration(msg)
            }
        }
    }
}

/// Classify an AWS SDK error string into the appropriate [`AwsProviderError`].
///
/// `timeout` is the configured operation timeout, reported back when the
/// message indicates the call timed out.
pub fn classify_sdk_error(error_str: &str, timeout: Duration) -> AwsProviderError {
    let lower = error_str.to_lowercase();
    if lower.contains("throttl") || lower.contains("rate exceed") || lower.contains("too many") {
        AwsProviderError::Throttled
    } else if lower.contains("timeout") || lower.contains("timed out") {
        AwsProviderError::Timeout(timeout)
    } else if lower.contains("accessdenied")
        || lower.contains("access denied")
        || lower.contains("not authorized")
    {
        AwsProviderError::AccessDenied(error_str.to_owned())
    } else if lower.contains("credential")
        || lower.contains("expiredtoken")
        || lower.contains("unrecognizedclient")
        || lower.contains("security token")
    {
        AwsProviderError::CredentialError(error_str.to_owned())
    } else if lower.contains("connection")
        || lower.contains("connect")
        || lower.contains("dns")
        || lower.contains("network")
    {
        AwsProviderError::Connection(error_str.to_owned())
    } else {
        AwsProviderError::ServiceError(error_str.to_owned())
    }
}
