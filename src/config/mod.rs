//! Configuration loading and management for the Shift Engine.
//!
//! This module loads engine settings and per-store scheduling policies from
//! YAML files.
//!
//! # Example
//!
//! ```no_run
//! use shift_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/retail").unwrap();
//! println!("Loaded: {}", config.settings().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, EngineSettings};
