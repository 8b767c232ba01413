//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides
//! - Command-line overrides
//! - Configuration validation

pub mod loader;
pub mod settings;

pub use loader::{ConfigError, ConfigLoader, ConfigOverrides, DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use settings::{Config, GeneratorConfig, GeneratorKind};
