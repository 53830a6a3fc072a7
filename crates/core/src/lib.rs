//! Data model for Vigil probes.
//!
//! - [`ProbeParams`] validates the identifying parameters of a probe, either
//!   typed or from a loose JSON value.
//! - [`RawScalingGroup`] mirrors a describe record as the provider returns
//!   it, and [`ScalingGroupState`] is its normalized, read-only form.

pub mod error;
pub mod params;
pub mod scaling_group;

pub use error::ValidationError;
pub use params::ProbeParams;
pub use scaling_group::{
    DescribeScalingGroupsOutput, RawCount, RawScalingGroup, RawTag, ScalingGroupState,
    ScalingGroupTag,
};
