//! AWS backends for Vigil probes.
//!
//! - **Auto Scaling** (`autoscaling` feature): describe Auto Scaling groups
//!   by name for [`ScalingGroupProbe`](https://docs.rs/vigil-probe)
//!
//! Backends share a common [`AwsBaseConfig`](config::AwsBaseConfig) for
//! region, named profile, endpoint override, operation timeout and optional
//! STS assume-role credentials.

pub mod auth;
pub mod config;
pub mod error;

#[cfg(feature = "autoscaling")]
pub mod autoscaling;

// Re-exports for convenience.
pub use config::AwsBaseConfig;
pub use error::AwsProviderError;

#[cfg(feature = "autoscaling")]
pub use autoscaling::{AutoScalingBackend, AutoScalingConfig, register_default_backend};
