//! Application state for the Shift Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::models::StorePolicy;

/// Shared application state.
///
/// Holds the loaded configuration. Schedule data is never cached here; each
/// request brings its own snapshot.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Picks the policy supplied with a request, falling back to the configured one.
    pub fn resolve_policy<'a>(
        &'a self,
        store_id: &str,
        supplied: Option<&'a StorePolicy>,
    ) -> Option<&'a StorePolicy> {
        supplied.or_else(|| self.config.store_policy(store_id))
    }
}
