use std::sync::Arc;

use serde_json::json;
use vigil_core::{RawCount, RawScalingGroup, RawTag};
use vigil_probe::{BackendFactory, ProviderError, ScalingGroupProbe, ValidationError};
use vigil_provider::AutoScalingGroups;
use vigil_provider::testing::{FailingBackend, StaticBackend};

fn my_asg() -> RawScalingGroup {
    serde_json::from_value(json!({
        "auto_scaling_group_name": "MyASG",
        "min_size": "1",
        "max_size": 4,
        "desired_capacity": 2,
        "health_check_type": "ELB",
        "vpc_zone_identifier": "subnet-1,subnet-2",
        "launch_configuration_name": "MyLaunchConfiguration",
        "tags": [{
            "resource_id": "g1",
            "resource_type": "auto-scaling-group",
            "key": "Env",
            "value": "prod",
            "propagate_at_launch": true
        }]
    }))
    .unwrap()
}

fn factory_with(backend: Arc<StaticBackend>) -> Arc<BackendFactory> {
    Arc::new(BackendFactory::new().with_backend::<AutoScalingGroups>(backend))
}

fn probe(factory: Arc<BackendFactory>) -> ScalingGroupProbe {
    ScalingGroupProbe::from_value(&json!({"name": "MyASG"}), factory).unwrap()
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn empty_parameters_fail_before_any_fetch() {
    let backend = Arc::new(StaticBackend::with_groups(vec![my_asg()]));
    let err =
        ScalingGroupProbe::from_value(&json!({}), factory_with(backend.clone())).unwrap_err();
    assert_eq!(err, ValidationError::MissingName);
    assert_eq!(backend.call_count(), 0);
}

#[test]
fn unrecognized_parameter_fails() {
    let err = ScalingGroupProbe::from_value(
        &json!({"name": "x", "other": 1}),
        Arc::new(BackendFactory::new()),
    )
    .unwrap_err();
    assert_eq!(err, ValidationError::UnrecognizedParameter("other".into()));
}

#[test]
fn non_string_name_fails() {
    let err = ScalingGroupProbe::from_value(&json!({"name": 123}), Arc::new(BackendFactory::new()))
        .unwrap_err();
    assert!(matches!(err, ValidationError::InvalidType { .. }));
}

#[test]
fn scalar_name_is_accepted() {
    let probe =
        ScalingGroupProbe::from_value(&json!("MyASG"), Arc::new(BackendFactory::new())).unwrap();
    assert_eq!(probe.requested_name(), "MyASG");
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn single_record_is_normalized() {
    let backend = Arc::new(StaticBackend::with_groups(vec![my_asg()]));
    let probe = probe(factory_with(backend.clone()));

    assert!(probe.exists().await.unwrap());
    assert_eq!(probe.name().await.unwrap(), Some("MyASG"));
    assert_eq!(probe.min_size().await.unwrap(), Some(1));
    assert_eq!(probe.max_size().await.unwrap(), Some(4));
    assert_eq!(probe.desired_capacity().await.unwrap(), Some(2));
    assert_eq!(probe.health_check_type().await.unwrap(), Some("ELB"));
    assert_eq!(
        probe.vpc_zone_identifier().await.unwrap(),
        Some(&["subnet-1".to_owned(), "subnet-2".to_owned()][..])
    );
    assert_eq!(
        probe.launch_configuration_name().await.unwrap(),
        Some("MyLaunchConfiguration")
    );
    assert_eq!(backend.requests(), vec![vec!["MyASG"]]);
}

#[tokio::test]
async fn echoed_name_comes_from_the_response() {
    let raw = RawScalingGroup {
        auto_scaling_group_name: Some("my-asg-canonical".into()),
        ..RawScalingGroup::default()
    };
    let probe = probe(factory_with(Arc::new(StaticBackend::with_groups(vec![raw]))));

    assert_eq!(probe.name().await.unwrap(), Some("my-asg-canonical"));
    assert_eq!(probe.requested_name(), "MyASG");
}

#[tokio::test]
async fn record_without_a_name_leaves_name_unset() {
    let raw = RawScalingGroup {
        min_size: Some(RawCount::Integer(2)),
        ..RawScalingGroup::default()
    };
    let probe = probe(factory_with(Arc::new(StaticBackend::with_groups(vec![raw]))));

    assert!(probe.exists().await.unwrap());
    assert_eq!(probe.name().await.unwrap(), None);
    assert_eq!(probe.min_size().await.unwrap(), Some(2));
}

#[tokio::test]
async fn tags_keep_order_and_fields() {
    let mut raw = my_asg();
    raw.tags.push(RawTag {
        resource_id: Some("g1".into()),
        resource_type: Some("auto-scaling-group".into()),
        key: Some("App".into()),
        value: Some("web".into()),
        propagate_at_launch: Some(false),
    });
    let probe = probe(factory_with(Arc::new(StaticBackend::with_groups(vec![raw]))));

    let tags = probe.tags().await.unwrap().unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].resource_id, "g1");
    assert_eq!(tags[0].resource_type, "auto-scaling-group");
    assert_eq!(tags[0].key, "Env");
    assert_eq!(tags[0].value, "prod");
    assert!(tags[0].propagate_at_launch);
    assert_eq!(tags[1].key, "App");
    assert!(!tags[1].propagate_at_launch);
}

#[tokio::test]
async fn launch_template_group_has_no_launch_configuration() {
    let mut raw = my_asg();
    raw.launch_configuration_name = None;
    raw.vpc_zone_identifier = None;
    let probe = probe(factory_with(Arc::new(StaticBackend::with_groups(vec![raw]))));

    assert!(probe.exists().await.unwrap());
    assert_eq!(probe.launch_configuration_name().await.unwrap(), None);
    assert_eq!(probe.vpc_zone_identifier().await.unwrap(), Some(&[][..]));
}

#[tokio::test]
async fn zero_records_means_not_found() {
    let probe = probe(factory_with(Arc::new(StaticBackend::empty())));

    assert!(!probe.exists().await.unwrap());
    assert_eq!(probe.name().await.unwrap(), None);
    assert_eq!(probe.min_size().await.unwrap(), None);
    assert_eq!(probe.max_size().await.unwrap(), None);
    assert_eq!(probe.desired_capacity().await.unwrap(), None);
    assert_eq!(probe.health_check_type().await.unwrap(), None);
    assert_eq!(probe.vpc_zone_identifier().await.unwrap(), None);
    assert_eq!(probe.launch_configuration_name().await.unwrap(), None);
    assert!(probe.tags().await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_records_mean_not_found() {
    let backend = Arc::new(StaticBackend::with_groups(vec![my_asg(), my_asg()]));
    let probe = probe(factory_with(backend));

    assert!(!probe.exists().await.unwrap());
    assert!(probe.state().is_none());
    assert_eq!(probe.min_size().await.unwrap(), None);
}

// ---------------------------------------------------------------------------
// Memoization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reads_after_resolution_do_not_refetch() {
    let backend = Arc::new(StaticBackend::with_groups(vec![my_asg()]));
    let probe = probe(factory_with(backend.clone()));

    let first = probe.tags().await.unwrap().unwrap().to_vec();
    let second = probe.tags().await.unwrap().unwrap().to_vec();
    assert_eq!(first, second);
    assert_eq!(probe.min_size().await.unwrap(), probe.min_size().await.unwrap());
    assert!(probe.exists().await.unwrap());

    assert_eq!(backend.call_count(), 1);
    assert_eq!(probe.state().map(|s| s.max_size), Some(4));
}

#[tokio::test]
async fn not_found_is_memoized() {
    let backend = Arc::new(StaticBackend::empty());
    let probe = probe(factory_with(backend.clone()));

    assert!(!probe.exists().await.unwrap());
    assert!(!probe.exists().await.unwrap());
    assert_eq!(probe.max_size().await.unwrap(), None);
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn concurrent_first_reads_fetch_once() {
    let backend = Arc::new(StaticBackend::with_groups(vec![my_asg()]));
    let probe = probe(factory_with(backend.clone()));

    let (a, b) = tokio::join!(probe.exists(), probe.desired_capacity());
    assert!(a.unwrap());
    assert_eq!(b.unwrap(), Some(2));
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn each_probe_fetches_independently() {
    let backend = Arc::new(StaticBackend::with_groups(vec![my_asg()]));
    let factory = factory_with(backend.clone());

    assert!(probe(factory.clone()).exists().await.unwrap());
    assert!(probe(factory).exists().await.unwrap());
    assert_eq!(backend.call_count(), 2);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn transport_failure_is_returned_and_not_cached() {
    let failing = Arc::new(FailingBackend::connection("connection reset by peer"));
    let factory =
        Arc::new(BackendFactory::new().with_backend::<AutoScalingGroups>(failing.clone()));
    let probe = probe(factory.clone());

    let err = probe.min_size().await.unwrap_err();
    assert!(matches!(err, ProviderError::Connection(ref msg) if msg == "connection reset by peer"));
    assert!(!probe.is_resolved());

    let working = Arc::new(StaticBackend::with_groups(vec![my_asg()]));
    factory.set_default_backend::<AutoScalingGroups>(working.clone());

    assert_eq!(probe.min_size().await.unwrap(), Some(1));
    assert!(probe.is_resolved());
    assert_eq!(failing.call_count(), 1);
    assert_eq!(working.call_count(), 1);
}

#[tokio::test]
async fn repeated_failures_retry_each_time() {
    let failing = Arc::new(FailingBackend::connection("unreachable"));
    let factory =
        Arc::new(BackendFactory::new().with_backend::<AutoScalingGroups>(failing.clone()));
    let probe = probe(factory);

    assert!(probe.exists().await.is_err());
    assert!(probe.exists().await.is_err());
    assert_eq!(failing.call_count(), 2);
}

#[tokio::test]
async fn missing_backend_is_reported_then_recovers() {
    let factory = Arc::new(BackendFactory::new());
    let probe = probe(factory.clone());

    let err = probe.exists().await.unwrap_err();
    assert!(matches!(err, ProviderError::NotFound(_)));

    factory.set_default_backend::<AutoScalingGroups>(Arc::new(StaticBackend::with_groups(vec![
        my_asg(),
    ])));
    assert!(probe.exists().await.unwrap());
}
