use aws_config::timeout::TimeoutConfig;
use tracing::{debug, info};

use crate::config::AwsBaseConfig;

/// Default STS session name when none is configured.
const DEFAULT_SESSION_NAME: &str = "vigil-probe";

/// Build an AWS SDK configuration from the given [`AwsBaseConfig`].
///
/// Starts from the standard environment credential chain, then applies the
/// named profile, endpoint override and operation timeout. When `role_arn` is
/// set, the returned config carries an auto-refreshing STS assume-role
/// credential provider built on top of the base credentials.
///
/// # Examples
///
/// ```no_run
/// use vigil_aws::config::AwsBaseConfig;
/// use vigil_aws::auth::build_sdk_config;
///
/// # async fn example() {
/// let config = AwsBaseConfig::new("us-east-1")
///     .with_endpoint_url("http://localhost:4566");
/// let sdk_config = build_sdk_config(&config).await;
/// # }
/// ```
pub async fn build_sdk_config(config: &AwsBaseConfig) -> aws_config::SdkConfig {
    let loader = base_loader(config);

    let Some(role_arn) = &config.role_arn else {
        return loader.load().await;
    };

    let session_name = config
        .session_name
        .as_deref()
        .unwrap_or(DEFAULT_SESSION_NAME);
    info!(role_arn = %role_arn, session_name = %session_name, "assuming IAM role via STS (auto-refresh)");

    // STS calls use the base credentials and endpoint override.
    let base_config = loader.load().await;

    let mut provider_builder = aws_config::sts::AssumeRoleProvider::builder(role_arn)
        .session_name(session_name)
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(ref external_id) = config.external_id {
        provider_builder = provider_builder.external_id(external_id);
    }

    let assume_role_provider = provider_builder.configure(&base_config).build().await;

    base_loader(config)
        .credentials_provider(assume_role_provider)
        .load()
        .await
}

fn base_loader(config: &AwsBaseConfig) -> aws_config::ConfigLoader {
    let mut loader = aws_config::from_env()
        .region(aws_config::Region::new(config.region.clone()))
        .timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(config.operation_timeout())
                .build(),
        );

    if let Some(profile) = &config.profile {
        debug!(profile = %profile, "using named AWS profile");
        loader = loader.profile_name(profile);
    }

    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom AWS endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    loader
}
