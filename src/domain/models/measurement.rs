use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{GeneratorCounters, Nanoseconds, SearchOptions};

/// Outcome of one timed trial at a fixed interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrialVerdict {
    pub interval: Nanoseconds,
    pub passed: bool,
    /// Stopped before the planned end because the satisfy ratio regressed
    pub early_failed: bool,
    /// Counters the verdict was decided on
    pub counters: GeneratorCounters,
}

impl TrialVerdict {
    pub const fn completed(interval: Nanoseconds, passed: bool, counters: GeneratorCounters) -> Self {
        Self {
            interval,
            passed,
            early_failed: false,
            counters,
        }
    }

    pub const fn early_fail(interval: Nanoseconds, counters: GeneratorCounters) -> Self {
        Self {
            interval,
            passed: false,
            early_failed: true,
            counters,
        }
    }
}

/// Result of an MSI search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MeasureResult {
    /// No candidate interval passed.
    pub is_underflow: bool,
    /// The search exhausted the upper end of the range.
    pub is_overflow: bool,
    /// Smallest interval observed to pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msi: Option<Nanoseconds>,
    /// Counters of the trial that established `msi`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counters: Option<GeneratorCounters>,
    /// Every trial in execution order
    #[serde(default)]
    pub trials: Vec<TrialVerdict>,
}

impl MeasureResult {
    /// Result for an empty candidate range.
    pub const fn empty_range() -> Self {
        Self {
            is_underflow: true,
            is_overflow: true,
            msi: None,
            counters: None,
            trials: Vec::new(),
        }
    }
}

/// A finished measurement with run metadata, as printed by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MeasurementReport {
    pub run_id: Uuid,
    pub generator: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub options: SearchOptions,
    #[serde(flatten)]
    pub result: MeasureResult,
}
