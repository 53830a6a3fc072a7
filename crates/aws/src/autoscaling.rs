use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_autoscaling::error::DisplayErrorContext;
use aws_sdk_autoscaling::types::{AutoScalingGroup, TagDescription};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};
use vigil_core::{DescribeScalingGroupsOutput, RawCount, RawScalingGroup, RawTag};
use vigil_provider::{AutoScalingGroups, BackendFactory, ProviderError, ScalingGroupBackend};

use crate::auth::build_sdk_config;
use crate::config::AwsBaseConfig;
use crate::error::{AwsProviderError, classify_sdk_error};

/// Configuration for the AWS Auto Scaling backend.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AutoScalingConfig {
    /// Shared AWS configuration (region, profile, role ARN, endpoint URL).
    #[serde(flatten)]
    pub aws: AwsBaseConfig,
}

impl std::fmt::Debug for AutoScalingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoScalingConfig")
            .field("aws", &self.aws)
            .finish()
    }
}

impl AutoScalingConfig {
    /// Create a new `AutoScalingConfig` with the given AWS region.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            aws: AwsBaseConfig::new(region),
        }
    }

    /// Wrap an existing base configuration.
    pub fn from_base(aws: AwsBaseConfig) -> Self {
        Self { aws }
    }

    /// Set the endpoint URL override (for `LocalStack`).
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.aws.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Set the IAM role ARN to assume.
    #[must_use]
    pub fn with_role_arn(mut self, role_arn: impl Into<String>) -> Self {
        self.aws.role_arn = Some(role_arn.into());
        self
    }

    /// Use a named profile from the shared AWS config files.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.aws.profile = Some(profile.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Auto Scaling backend that calls `DescribeAutoScalingGroups` on the real API.
///
/// Only the first page of results is read; a probe always asks for a single
/// name.
pub struct AutoScalingBackend {
    config: AutoScalingConfig,
    client: aws_sdk_autoscaling::Client,
}

impl std::fmt::Debug for AutoScalingBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoScalingBackend")
            .field("config", &self.config)
            .field("client", &"<AutoScalingClient>")
            .finish()
    }
}

impl AutoScalingBackend {
    /// Create a new `AutoScalingBackend` by building an AWS SDK client.
    ///
    /// The configuration is validated first; an unusable one (for example a
    /// zero operation timeout) never reaches the SDK.
    pub async fn new(config: AutoScalingConfig) -> Result<Self, AwsProviderError> {
        config.aws.validate()?;
        let sdk_config = build_sdk_config(&config.aws).await;
        let client = aws_sdk_autoscaling::Client::new(&sdk_config);
        Ok(Self { config, client })
    }

    /// Create an `AutoScalingBackend` with a pre-built client.
    pub fn with_client(config: AutoScalingConfig, client: aws_sdk_autoscaling::Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &AutoScalingConfig {
        &self.config
    }
}

#[async_trait]
impl ScalingGroupBackend for AutoScalingBackend {
    #[instrument(skip(self), fields(backend = "aws-autoscaling", region = %self.config.aws.region))]
    async fn describe_auto_scaling_groups(
        &self,
        names: &[String],
    ) -> Result<DescribeScalingGroupsOutput, ProviderError> {
        // An unfiltered call would list every group in the account.
        if names.is_empty() {
            debug!("no group names requested");
            return Ok(DescribeScalingGroupsOutput::empty());
        }
        debug!(group_names = ?names, "describing Auto Scaling Groups");

        let request = self
            .client
            .describe_auto_scaling_groups()
            .set_auto_scaling_group_names(Some(names.to_vec()));

        let result = request.send().await.map_err(|e| {
            let err_str = DisplayErrorContext(&e).to_string();
            error!(error = %err_str, "describe_auto_scaling_groups failed");
            let aws_err: ProviderError =
                classify_sdk_error(&err_str, self.config.aws.operation_timeout()).into();
            aws_err
        })?;

        let groups: Vec<RawScalingGroup> = result
            .auto_scaling_groups()
            .iter()
            .map(raw_group_from_sdk)
            .collect();

        info!(count = groups.len(), "Auto Scaling Groups described");
        Ok(DescribeScalingGroupsOutput::new(groups))
    }
}

/// Build the real backend and make it the active one for Auto Scaling probes.
pub async fn register_default_backend(
    factory: &BackendFactory,
    config: AutoScalingConfig,
) -> Result<Arc<AutoScalingBackend>, AwsProviderError> {
    let backend = Arc::new(AutoScalingBackend::new(config).await?);
    factory.set_default_backend::<AutoScalingGroups>(backend.clone());
    Ok(backend)
}

// ---------------------------------------------------------------------------
// SDK record conversion
// ---------------------------------------------------------------------------

// The helpers accept both plain and optional SDK accessors.

fn text<'a>(value: impl Into<Option<&'a str>>) -> Option<String> {
    value.into().map(str::to_owned)
}

fn count(value: impl Into<Option<i32>>) -> Option<RawCount> {
    value.into().map(RawCount::from)
}

fn flag(value: impl Into<Option<bool>>) -> Option<bool> {
    value.into()
}

fn raw_tag_from_sdk(tag: &TagDescription) -> RawTag {
    RawTag {
        resource_id: text(tag.resource_id()),
        resource_type: text(tag.resource_type()),
        key: text(tag.key()),
        value: text(tag.value()),
        propagate_at_launch: flag(tag.propagate_at_launch()),
    }
}

fn raw_group_from_sdk(group: &AutoScalingGroup) -> RawScalingGroup {
    RawScalingGroup {
        auto_scaling_group_name: text(group.auto_scaling_group_name()),
        min_size: count(group.min_size()),
        max_size: count(group.max_size()),
        desired_capacity: count(group.desired_capacity()),
        health_check_type: text(group.health_check_type()),
        vpc_zone_identifier: text(group.vpc_zone_identifier()),
        launch_configuration_name: text(group.launch_configuration_name()),
        tags: group.tags().iter().map(raw_tag_from_sdk).collect(),
    }
}
