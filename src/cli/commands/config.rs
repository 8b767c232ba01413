//! `msibench config` - show the effective configuration.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::config::Config;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ConfigOutput(pub Config);

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.0).unwrap_or_default()
    }
}

pub fn execute(config: &Config, human: bool) -> Result<()> {
    output(&ConfigOutput(config.clone()), human);
    Ok(())
}
