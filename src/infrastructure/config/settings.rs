use serde::{Deserialize, Serialize};

use crate::adapters::traffic_gen::JsonRpcConfig;
use crate::domain::models::{Nanoseconds, SearchOptions};
use crate::infrastructure::logging::LogConfig;

/// Main configuration structure for msibench
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Search options for the measurement
    #[serde(default)]
    pub search: SearchOptions,

    /// Which generator to drive and how to reach it
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LogConfig,
}

/// Generator selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    /// Ping client behind a JSON-RPC management endpoint
    #[default]
    Jsonrpc,
    /// In-process fixed-capacity model
    Simulated,
}

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GeneratorConfig {
    #[serde(default)]
    pub kind: GeneratorKind,

    /// JSON-RPC connection settings
    #[serde(default)]
    pub jsonrpc: JsonRpcConfig,

    /// Capacity of the simulated responder, in nanoseconds per request
    #[serde(default = "default_capacity")]
    pub capacity: Nanoseconds,
}

const fn default_capacity() -> Nanoseconds {
    2000
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            kind: GeneratorKind::default(),
            jsonrpc: JsonRpcConfig::default(),
            capacity: default_capacity(),
        }
    }
}
