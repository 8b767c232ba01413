//! `msibench trial` - one timed trial at a fixed interval.

use anyhow::{Context, Result};
use serde::Serialize;

use super::create_generator;
use crate::cli::output::{output, verdict_label, CommandOutput};
use crate::domain::models::{Nanoseconds, TrialVerdict};
use crate::infrastructure::config::Config;
use crate::services::TrialRunner;

#[derive(Debug, Serialize)]
pub struct TrialOutput {
    pub generator: String,
    #[serde(flatten)]
    pub verdict: TrialVerdict,
}

impl CommandOutput for TrialOutput {
    fn to_human(&self) -> String {
        let cnt = &self.verdict.counters;
        format!(
            "Interval {}ns: {} (satisfy ratio {:.6}, {} of {} requests, {} nacks) via {}",
            self.verdict.interval,
            verdict_label(&self.verdict),
            cnt.satisfy_ratio,
            cnt.n_satisfied,
            cnt.n_requests,
            cnt.n_nacks,
            self.generator
        )
    }
}

pub async fn execute(config: &Config, interval: Nanoseconds, human: bool) -> Result<()> {
    let runner = TrialRunner::new(config.search.clone()).context("Invalid search options")?;
    let mut generator = create_generator(&config.generator)?;
    let verdict = runner
        .run_trial(generator.as_mut(), interval)
        .await
        .context("Trial aborted")?;

    output(
        &TrialOutput {
            generator: generator.name().to_string(),
            verdict,
        },
        human,
    );
    Ok(())
}
