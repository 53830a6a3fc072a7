use async_trait::async_trait;
use vigil_core::DescribeScalingGroupsOutput;

use crate::ProviderError;

/// A family of resources served by one backend trait.
///
/// Kinds are zero-sized marker types. The [`BackendFactory`](crate::BackendFactory)
/// keys its registrations by [`ResourceKind::NAME`] and hands back an
/// `Arc<Self::Backend>`.
pub trait ResourceKind: 'static {
    /// Stable identifier of the kind, used in logs and errors.
    const NAME: &'static str;

    /// The backend trait object serving this kind.
    type Backend: ?Sized + Send + Sync + 'static;
}

/// Backend for Auto Scaling group lookups.
///
/// The real implementation talks to the AWS API; tests substitute the doubles
/// in [`testing`](crate::testing).
#[async_trait]
pub trait ScalingGroupBackend: Send + Sync {
    /// Describe the Auto Scaling groups with the given names.
    ///
    /// Returns every matching record; unknown names are simply absent from
    /// the output.
    async fn describe_auto_scaling_groups(
        &self,
        names: &[String],
    ) -> Result<DescribeScalingGroupsOutput, ProviderError>;
}

/// Marker for the Auto Scaling group resource kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoScalingGroups;

impl ResourceKind for AutoScalingGroups {
    const NAME: &'static str = "aws_auto_scaling_group";
    type Backend = dyn ScalingGroupBackend;
}
