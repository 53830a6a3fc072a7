use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::ProviderError;
use crate::backend::ResourceKind;

/// Maps each resource kind to its active backend.
///
/// The factory is an explicit context object: build one at startup, register
/// the real backends (see `vigil_aws::register_default_backend`), and share it
/// with probes through an `Arc`. Tests register doubles instead.
///
/// Only one backend is active per kind. Replacing a backend is last-write-wins
/// and is meant to happen during setup; a probe that is resolving while a swap
/// happens may see either backend.
#[derive(Default)]
pub struct BackendFactory {
    backends: RwLock<HashMap<&'static str, Box<dyn Any + Send + Sync>>>,
}

impl std::fmt::Debug for BackendFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendFactory")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl BackendFactory {
    /// Create an empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration.
    #[must_use]
    pub fn with_backend<K: ResourceKind>(self, backend: Arc<K::Backend>) -> Self {
        self.set_default_backend::<K>(backend);
        self
    }

    /// Install the active backend for kind `K`.
    ///
    /// Returns `true` if a previously registered backend was replaced.
    pub fn set_default_backend<K: ResourceKind>(&self, backend: Arc<K::Backend>) -> bool {
        let replaced = self
            .backends
            .write()
            .insert(K::NAME, Box::new(backend))
            .is_some();
        if replaced {
            info!(kind = K::NAME, "replaced active backend");
        } else {
            debug!(kind = K::NAME, "registered backend");
        }
        replaced
    }

    /// Return the active backend for kind `K`.
    pub fn create<K: ResourceKind>(&self) -> Result<Arc<K::Backend>, ProviderError> {
        let backends = self.backends.read();
        let entry = backends
            .get(K::NAME)
            .ok_or_else(|| ProviderError::NotFound(K::NAME.to_owned()))?;
        entry
            .downcast_ref::<Arc<K::Backend>>()
            .cloned()
            .ok_or_else(|| {
                ProviderError::Configuration(format!(
                    "backend registered for '{}' does not implement the expected interface",
                    K::NAME
                ))
            })
    }

    /// Whether a backend is registered for kind `K`.
    pub fn contains<K: ResourceKind>(&self) -> bool {
        self.backends.read().contains_key(K::NAME)
    }

    /// Remove the backend for kind `K`, returning whether one was registered.
    pub fn remove<K: ResourceKind>(&self) -> bool {
        self.backends.write().remove(K::NAME).is_some()
    }

    /// Registered kind identifiers, sorted.
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self.backends.read().keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }
}
