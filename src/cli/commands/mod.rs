//! CLI command implementations.

pub mod config;
pub mod measure;
pub mod trial;

use anyhow::{Context, Result};

use crate::adapters::traffic_gen::{JsonRpcTrafficGen, SimulatedTrafficGen};
use crate::domain::ports::TrafficGen;
use crate::infrastructure::config::{GeneratorConfig, GeneratorKind};

/// Construct the generator the configuration selects.
pub fn create_generator(config: &GeneratorConfig) -> Result<Box<dyn TrafficGen>> {
    let generator: Box<dyn TrafficGen> = match config.kind {
        GeneratorKind::Jsonrpc => Box::new(
            JsonRpcTrafficGen::new(config.jsonrpc.clone())
                .context("Failed to create JSON-RPC generator client")?,
        ),
        GeneratorKind::Simulated => Box::new(SimulatedTrafficGen::new(config.capacity)),
    };
    Ok(generator)
}
