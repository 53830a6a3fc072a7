//! Single-resource compliance probe for AWS Auto Scaling groups.
//!
//! A [`ScalingGroupProbe`] validates its identifying parameters up front,
//! then fetches the group through the backend registered in a
//! [`BackendFactory`](vigil_provider::BackendFactory) the first time any
//! attribute is read. The normalized result is cached for the lifetime of the
//! probe; transport failures are returned as-is and not cached.

pub mod probe;

pub use probe::ScalingGroupProbe;
pub use vigil_core::{ProbeParams, ScalingGroupState, ScalingGroupTag, ValidationError};
pub use vigil_provider::{BackendFactory, ProviderError};
