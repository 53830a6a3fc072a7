//! Backend doubles for exercising probes without network access.
//!
//! Both doubles count their calls so tests can assert how many times a probe
//! actually reached the backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use vigil_core::{DescribeScalingGroupsOutput, RawScalingGroup};

use crate::ProviderError;
use crate::backend::ScalingGroupBackend;

/// Answers every describe call with the same canned output.
#[derive(Debug, Default)]
pub struct StaticBackend {
    output: DescribeScalingGroupsOutput,
    calls: AtomicUsize,
    requests: Mutex<Vec<Vec<String>>>,
}

impl StaticBackend {
    pub fn new(output: DescribeScalingGroupsOutput) -> Self {
        Self {
            output,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A backend that never finds anything.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_groups(groups: Vec<RawScalingGroup>) -> Self {
        Self::new(DescribeScalingGroupsOutput::new(groups))
    }

    /// Build from a JSON fixture shaped like a describe response.
    pub fn from_json(fixture: &serde_json::Value) -> Result<Self, ProviderError> {
        let output: DescribeScalingGroupsOutput = serde_json::from_value(fixture.clone())?;
        Ok(Self::new(output))
    }

    /// Number of describe calls served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Name lists passed to each describe call, in order.
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl ScalingGroupBackend for StaticBackend {
    async fn describe_auto_scaling_groups(
        &self,
        names: &[String],
    ) -> Result<DescribeScalingGroupsOutput, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(names.to_vec());
        Ok(self.output.clone())
    }
}

/// The kind of failure a [`FailingBackend`] produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    Connection(String),
    Timeout(Duration),
    RateLimited,
    ExecutionFailed(String),
}

impl FailureType {
    fn to_error(&self) -> ProviderError {
        match self {
            Self::Connection(msg) => ProviderError::Connection(msg.clone()),
            Self::Timeout(after) => ProviderError::Timeout(*after),
            Self::RateLimited => ProviderError::RateLimited,
            Self::ExecutionFailed(msg) => ProviderError::ExecutionFailed(msg.clone()),
        }
    }
}

/// Fails every describe call.
#[derive(Debug)]
pub struct FailingBackend {
    failure: FailureType,
    calls: AtomicUsize,
}

impl FailingBackend {
    pub fn new(failure: FailureType) -> Self {
        Self {
            failure,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Self::new(FailureType::Connection(msg.into()))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScalingGroupBackend for FailingBackend {
    async fn describe_auto_scaling_groups(
        &self,
        _names: &[String],
    ) -> Result<DescribeScalingGroupsOutput, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.failure.to_error())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn static_backend_records_requests() {
        let backend = StaticBackend::empty();
        backend
            .describe_auto_scaling_groups(&["a".to_owned()])
            .await
            .unwrap();
        backend
            .describe_auto_scaling_groups(&["b".to_owned()])
            .await
            .unwrap();
        assert_eq!(backend.call_count(), 2);
        assert_eq!(backend.requests(), vec![vec!["a"], vec!["b"]]);
    }

    #[tokio::test]
    async fn static_backend_from_fixture() {
        let backend = StaticBackend::from_json(&json!({
            "auto_scaling_groups": [{"auto_scaling_group_name": "g1", "min_size": 1}]
        }))
        .unwrap();
        let output = backend.describe_auto_scaling_groups(&[]).await.unwrap();
        assert_eq!(output.auto_scaling_groups.len(), 1);
        assert_eq!(
            output.auto_scaling_groups[0].auto_scaling_group_name.as_deref(),
            Some("g1")
        );
    }

    #[test]
    fn malformed_fixture_is_a_serialization_error() {
        let err = StaticBackend::from_json(&json!({"auto_scaling_groups": 5})).unwrap_err();
        assert!(matches!(err, ProviderError::Serialization(_)));
    }

    #[tokio::test]
    async fn failing_backend_fails_every_call() {
        let backend = FailingBackend::new(FailureType::RateLimited);
        for _ in 0..2 {
            let err = backend.describe_auto_scaling_groups(&[]).await.unwrap_err();
            assert!(matches!(err, ProviderError::RateLimited));
        }
        assert_eq!(backend.call_count(), 2);
    }
}
