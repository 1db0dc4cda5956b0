//! Configuration types for the Shift Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::HashMap;

use serde::Deserialize;

use crate::calculation::DEFAULT_SWEEP_BATCH_SIZE;
use crate::models::StorePolicy;

/// Engine-wide settings from `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Human-readable name of the deployment.
    pub name: String,
    /// Maximum number of schedules completed per sweep batch.
    #[serde(default = "default_sweep_batch_size")]
    pub sweep_batch_size: usize,
    /// Delay before conflicts are recomputed after input changes, in milliseconds.
    #[serde(default = "default_recompute_debounce_ms")]
    pub recompute_debounce_ms: u64,
}

fn default_sweep_batch_size() -> usize {
    DEFAULT_SWEEP_BATCH_SIZE
}

fn default_recompute_debounce_ms() -> u64 {
    300
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    settings: EngineSettings,
    /// Store policies keyed by store ID.
    policies: HashMap<String, StorePolicy>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(settings: EngineSettings, policies: Vec<StorePolicy>) -> Self {
        let policies = policies
            .into_iter()
            .map(|policy| (policy.store_id.clone(), policy))
            .collect();
        Self { settings, policies }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns all store policies.
    pub fn policies(&self) -> &HashMap<String, StorePolicy> {
        &self.policies
    }
}
