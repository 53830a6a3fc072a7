use std::fmt;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};
use vigil_core::{ProbeParams, ScalingGroupState, ScalingGroupTag, ValidationError};
use vigil_provider::{AutoScalingGroups, BackendFactory, ProviderError, ResourceKind};

/// Probe for one AWS Auto Scaling group, identified by name.
///
/// Parameters are validated when the probe is built. The group itself is
/// fetched lazily: the first call to [`resolve`](Self::resolve) or to any
/// attribute accessor asks the factory for the active Auto Scaling backend,
/// describes the group and caches the normalized [`ScalingGroupState`].
///
/// The group exists only if the provider returns exactly one record. Zero
/// records and, unexpectedly, several records for one name both resolve to
/// "does not exist"; every attribute accessor then returns `None`.
///
/// Backend failures are returned verbatim and leave the probe unresolved, so
/// the next read tries again (picking up whatever backend is active then).
#[derive(Debug)]
pub struct ScalingGroupProbe {
    params: ProbeParams,
    factory: Arc<BackendFactory>,
    resolved: OnceCell<Option<ScalingGroupState>>,
}

impl ScalingGroupProbe {
    /// Build a probe from typed parameters.
    pub fn new(params: ProbeParams, factory: Arc<BackendFactory>) -> Result<Self, ValidationError> {
        // `ProbeParams` has a public field, so the non-empty check is repeated here.
        if params.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self {
            params,
            factory,
            resolved: OnceCell::new(),
        })
    }

    /// Build a probe from loosely-typed parameters (`{"name": ...}` or a bare
    /// string).
    pub fn from_value(
        raw: &serde_json::Value,
        factory: Arc<BackendFactory>,
    ) -> Result<Self, ValidationError> {
        Self::new(ProbeParams::from_value(raw)?, factory)
    }

    /// The name the probe was built with. Never triggers a fetch.
    pub fn requested_name(&self) -> &str {
        &self.params.name
    }

    /// Whether a fetch has completed (found or not found).
    pub fn is_resolved(&self) -> bool {
        self.resolved.initialized()
    }

    /// The cached state, without triggering a fetch.
    pub fn state(&self) -> Option<&ScalingGroupState> {
        self.resolved.get().and_then(Option::as_ref)
    }

    /// Fetch and normalize the group on first use; later calls return the
    /// cached outcome.
    ///
    /// `Ok(None)` means the group does not exist.
    #[instrument(skip(self), fields(kind = AutoScalingGroups::NAME, name = %self.params.name))]
    pub async fn resolve(&self) -> Result<Option<&ScalingGroupState>, ProviderError> {
        let resolved = self.resolved.get_or_try_init(|| self.fetch()).await?;
        Ok(resolved.as_ref())
    }

    async fn fetch(&self) -> Result<Option<ScalingGroupState>, ProviderError> {
        let backend = self.factory.create::<AutoScalingGroups>()?;

        debug!("describing Auto Scaling group");
        let output = backend
            .describe_auto_scaling_groups(std::slice::from_ref(&self.params.name))
            .await
            .inspect_err(|e| warn!(error = %e, "describe_auto_scaling_groups failed"))?;

        match output.auto_scaling_groups.as_slice() {
            [group] => {
                let state = ScalingGroupState::from_raw(group);
                info!(
                    min_size = state.min_size,
                    max_size = state.max_size,
                    desired_capacity = state.desired_capacity,
                    "Auto Scaling group resolved"
                );
                Ok(Some(state))
            }
            [] => {
                info!("Auto Scaling group not found");
                Ok(None)
            }
            groups => {
                warn!(
                    count = groups.len(),
                    "provider returned several groups for one name; treating as not found"
                );
                Ok(None)
            }
        }
    }

    /// Whether the provider returned exactly one matching group.
    pub async fn exists(&self) -> Result<bool, ProviderError> {
        Ok(self.resolve().await?.is_some())
    }

    /// Group name as echoed by the provider.
    pub async fn name(&self) -> Result<Option<&str>, ProviderError> {
        Ok(self.resolve().await?.and_then(|s| s.name.as_deref()))
    }

    pub async fn min_size(&self) -> Result<Option<i64>, ProviderError> {
        Ok(self.resolve().await?.map(|s| s.min_size))
    }

    pub async fn max_size(&self) -> Result<Option<i64>, ProviderError> {
        Ok(self.resolve().await?.map(|s| s.max_size))
    }

    pub async fn desired_capacity(&self) -> Result<Option<i64>, ProviderError> {
        Ok(self.resolve().await?.map(|s| s.desired_capacity))
    }

    pub async fn health_check_type(&self) -> Result<Option<&str>, ProviderError> {
        Ok(self
            .resolve()
            .await?
            .and_then(|s| s.health_check_type.as_deref()))
    }

    pub async fn vpc_zone_identifier(&self) -> Result<Option<&[String]>, ProviderError> {
        Ok(self
            .resolve()
            .await?
            .map(|s| s.vpc_zone_identifier.as_slice()))
    }

    /// `None` when the group does not exist or launches from a template.
    pub async fn launch_configuration_name(&self) -> Result<Option<&str>, ProviderError> {
        Ok(self
            .resolve()
            .await?
            .and_then(|s| s.launch_configuration_name.as_deref()))
    }

    pub async fn tags(&self) -> Result<Option<&[ScalingGroupTag]>, ProviderError> {
        Ok(self.resolve().await?.map(|s| s.tags.as_slice()))
    }
}

impl fmt::Display for ScalingGroupProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Auto Scaling Group {}", self.params.name)
    }
}

#[cfg(test)]
mod tests {
    use vigil_provider::testing::StaticBackend;

    use super::*;

    #[test]
    fn typed_params_with_empty_name_are_rejected() {
        let params = ProbeParams {
            name: String::new(),
        };
        let err = ScalingGroupProbe::new(params, Arc::new(BackendFactory::new())).unwrap_err();
        assert_eq!(err, ValidationError::EmptyName);
    }

    #[test]
    fn display_uses_requested_name() {
        let probe = ScalingGroupProbe::new(
            ProbeParams::new("MyASG").unwrap(),
            Arc::new(BackendFactory::new()),
        )
        .unwrap();
        assert_eq!(probe.to_string(), "Auto Scaling Group MyASG");
        assert_eq!(probe.requested_name(), "MyASG");
    }

    #[tokio::test]
    async fn unresolved_probe_has_no_cached_state() {
        let backend = Arc::new(StaticBackend::empty());
        let factory =
            Arc::new(BackendFactory::new().with_backend::<AutoScalingGroups>(backend.clone()));
        let probe = ScalingGroupProbe::new(ProbeParams::new("MyASG").unwrap(), factory).unwrap();

        assert!(!probe.is_resolved());
        assert!(probe.state().is_none());
        assert_eq!(backend.call_count(), 0);

        assert!(!probe.exists().await.unwrap());
        assert!(probe.is_resolved());
        assert!(probe.state().is_none());
    }
}
