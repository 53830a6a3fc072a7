pub mod backend;
pub mod error;
pub mod factory;
pub mod testing;

pub use backend::{AutoScalingGroups, ResourceKind, ScalingGroupBackend};
pub use error::ProviderError;
pub use factory::BackendFactory;
