use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::{Config, GeneratorKind};
use crate::domain::models::{Nanoseconds, SearchOptionsOverrides};

/// Project config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "msibench.yaml";

/// Environment variable prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "MSIBENCH_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid search options: {0}")]
    InvalidSearchOptions(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Generator endpoint cannot be empty")]
    EmptyEndpoint,

    #[error("Invalid simulated capacity: {0}. Must be at least 1ns")]
    InvalidCapacity(Nanoseconds),

    #[error("Config file not found: {}", .0.display())]
    MissingFile(PathBuf),
}

/// Highest-precedence values, typically from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub search: SearchOptionsOverrides,
    pub generator_kind: Option<GeneratorKind>,
    pub endpoint: Option<String>,
    pub capacity: Option<Nanoseconds>,
    pub log_level: Option<String>,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `msibench.yaml` in the working directory, or `config_path` if given
    /// 3. Environment variables (`MSIBENCH_*`, nested with `__`)
    /// 4. `overrides`
    pub fn load(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Config> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()).into());
            }
        }

        let config: Config = Self::figment(config_path, overrides)
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// The layered figment `load` extracts from.
    pub fn figment(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Figment {
        let config_path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(config_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Serialized::default("search", &overrides.search));

        if let Some(kind) = overrides.generator_kind {
            figment = figment.merge(Serialized::default("generator.kind", kind));
        }
        if let Some(ref endpoint) = overrides.endpoint {
            figment = figment.merge(Serialized::default("generator.jsonrpc.endpoint", endpoint));
        }
        if let Some(capacity) = overrides.capacity {
            figment = figment.merge(Serialized::default("generator.capacity", capacity));
        }
        if let Some(ref level) = overrides.log_level {
            figment = figment.merge(Serialized::default("logging.level", level));
        }
        figment
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        config
            .search
            .validate()
            .map_err(|e| ConfigError::InvalidSearchOptions(e.to_string()))?;

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        match config.generator.kind {
            GeneratorKind::Jsonrpc if config.generator.jsonrpc.endpoint.trim().is_empty() => {
                return Err(ConfigError::EmptyEndpoint);
            }
            GeneratorKind::Simulated if config.generator.capacity == 0 => {
                return Err(ConfigError::InvalidCapacity(config.generator.capacity));
            }
            _ => {}
        }

        Ok(())
    }
}
