use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AwsProviderError;

/// Operation timeout applied when none is configured.
pub const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 30_000;

/// Shared base configuration for all AWS backends.
///
/// Covers where to reach AWS (region, endpoint override for `LocalStack`) and
/// which credentials to use (named profile, optional STS assume-role with an
/// external ID). Missing fields fall back to [`AwsBaseConfig::default`], so a
/// TOML `[aws]` table may be partial.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsBaseConfig {
    /// AWS region (e.g. `"us-east-1"`).
    pub region: String,

    /// Named profile from the shared AWS config/credentials files.
    pub profile: Option<String>,

    /// Optional IAM role ARN to assume via STS for cross-account access.
    pub role_arn: Option<String>,

    /// Optional endpoint URL override for local development (e.g. `LocalStack`).
    pub endpoint_url: Option<String>,

    /// Optional STS session name (defaults to `"vigil-probe"`).
    pub session_name: Option<String>,

    /// Optional external ID for cross-account trust policies.
    pub external_id: Option<String>,

    /// Per-operation timeout in milliseconds, retries included. Must be
    /// non-zero.
    pub operation_timeout_ms: u64,
}

impl std::fmt::Debug for AwsBaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsBaseConfig")
            .field("region", &self.region)
            .field("profile", &self.profile)
            .field("role_arn", &self.role_arn.as_ref().map(|_| "[REDACTED]"))
            .field("endpoint_url", &self.endpoint_url)
            .field("session_name", &self.session_name)
            .field("external_id", &self.external_id)
            .field("operation_timeout_ms", &self.operation_timeout_ms)
            .finish()
    }
}

impl AwsBaseConfig {
    /// Create a new `AwsBaseConfig` with the given region.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Self::default()
        }
    }

    /// Use a named profile from the shared AWS config files.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Set an IAM role ARN to assume via STS.
    #[must_use]
    pub fn with_role_arn(mut self, role_arn: impl Into<String>) -> Self {
        self.role_arn = Some(role_arn.into());
        self
    }

    /// Set an endpoint URL override for local development.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Set the STS session name for assume-role.
    #[must_use]
    pub fn with_session_name(mut self, session_name: impl Into<String>) -> Self {
        self.session_name = Some(session_name.into());
        self
    }

    /// Set the external ID for cross-account trust policies.
    #[must_use]
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Set the per-operation timeout.
    ///
    /// Stored at millisecond precision; a non-zero timeout below one
    /// millisecond rounds up to one. A zero timeout is kept so that
    /// [`validate`](Self::validate) can reject it.
    #[must_use]
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.operation_timeout_ms = if millis == 0 && !timeout.is_zero() {
            1
        } else {
            millis
        };
        self
    }

    /// The per-operation timeout as a [`Duration`].
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    /// Check the configuration before any SDK client is built.
    pub fn validate(&self) -> Result<(), AwsProviderError> {
        if self.region.is_empty() {
            return Err(AwsProviderError::InvalidConfig(
                "region must not be empty".into(),
            ));
        }
        if self.operation_timeout_ms == 0 {
            return Err(AwsProviderError::InvalidConfig(
                "operation_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for AwsBaseConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_owned(),
            profile: None,
            role_arn: None,
            endpoint_url: None,
            session_name: None,
            external_id: None,
            operation_timeout_ms: DEFAULT_OPERATION_TIMEOUT_MS,
        }
    }
}
