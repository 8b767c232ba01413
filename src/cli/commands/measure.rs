//! `msibench measure` - run the MSI search.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fmt::Write as _;
use tracing::info;
use uuid::Uuid;

use super::create_generator;
use crate::cli::output::{output, trials_table, CommandOutput};
use crate::domain::models::MeasurementReport;
use crate::domain::ports::TrafficGen;
use crate::infrastructure::config::Config;
use crate::services::IntervalSearchController;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct MeasureOutput(pub MeasurementReport);

impl CommandOutput for MeasureOutput {
    fn to_human(&self) -> String {
        let report = &self.0;
        let res = &report.result;
        let mut out = String::new();

        match res.msi {
            Some(msi) => {
                let _ = writeln!(out, "MSI: {msi}ns");
            }
            None => {
                let _ = writeln!(out, "MSI: none (no candidate interval passed)");
            }
        }
        if let Some(cnt) = res.counters {
            let _ = writeln!(
                out,
                "Satisfy ratio at MSI: {:.6} ({} of {} requests)",
                cnt.satisfy_ratio, cnt.n_satisfied, cnt.n_requests
            );
        }
        let _ = writeln!(
            out,
            "Underflow: {}  Overflow: {}",
            res.is_underflow, res.is_overflow
        );
        let _ = writeln!(
            out,
            "Range: {}..={} step {}ns, generator {}",
            report.options.interval_min,
            report.options.interval_max,
            report.options.interval_step,
            report.generator
        );
        if !res.trials.is_empty() {
            let _ = write!(out, "\n{}", trials_table(&res.trials));
        }
        out
    }
}

/// Run a full measurement against `generator`.
pub async fn run_measurement(
    config: &Config,
    generator: &mut dyn TrafficGen,
) -> Result<MeasurementReport> {
    let controller = IntervalSearchController::new(config.search.clone())
        .context("Invalid search options")?;

    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    info!(%run_id, generator = generator.name(), "starting MSI measurement");

    let result = controller
        .measure(generator)
        .await
        .context("MSI measurement aborted")?;

    Ok(MeasurementReport {
        run_id,
        generator: generator.name().to_string(),
        started_at,
        finished_at: Utc::now(),
        options: controller.options().clone(),
        result,
    })
}

pub async fn execute(config: &Config, human: bool) -> Result<()> {
    let mut generator = create_generator(&config.generator)?;
    let report = run_measurement(config, generator.as_mut()).await?;
    output(&MeasureOutput(report), human);
    Ok(())
}
