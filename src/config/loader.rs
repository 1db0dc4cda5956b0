//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings and store policies from YAML files.

use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::StorePolicy;

use super::types::{EngineConfig, EngineSettings};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/retail/
/// ├── engine.yaml        # Engine-wide settings
/// └── stores/
///     └── store_001.yaml # One store policy per file
/// ```
///
/// The `stores/` directory is optional; without it no store has a policy and
/// every policy-dependent rule is skipped.
///
/// # Example
///
/// ```no_run
/// use shift_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/retail")?;
/// println!("Loaded: {}", loader.settings().name);
/// if let Some(policy) = loader.store_policy("store_gangnam") {
///     println!("Max per shift: {:?}", policy.max_employees_per_shift);
/// }
/// # Ok::<(), shift_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `engine.yaml` is missing, or if any file contains
    /// invalid YAML or is missing a required field.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let policies = Self::load_policies(&path.join("stores"))?;

        info!(
            name = %settings.name,
            stores = policies.len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(settings, policies),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every store policy file from the stores directory.
    fn load_policies(stores_dir: &Path) -> EngineResult<Vec<StorePolicy>> {
        if !stores_dir.exists() {
            return Ok(Vec::new());
        }

        let stores_dir_str = stores_dir.display().to_string();
        let entries = fs::read_dir(stores_dir).map_err(|_| EngineError::ConfigNotFound {
            path: stores_dir_str.clone(),
        })?;

        let mut policies = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: stores_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                policies.push(Self::load_yaml::<StorePolicy>(&path)?);
            }
        }

        Ok(policies)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// Gets the policy for a store, if one is configured.
    pub fn store_policy(&self, store_id: &str) -> Option<&StorePolicy> {
        self.config.policies().get(store_id)
    }

    /// Returns the configured recompute debounce delay.
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.settings().recompute_debounce_ms)
    }
}
