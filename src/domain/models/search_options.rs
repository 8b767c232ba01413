use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::candidate_range::CandidateRange;
use super::Nanoseconds;
use crate::domain::errors::{DomainError, DomainResult};

/// Upper bound for every time field (secs): one year.
pub const MAX_SECONDS: f64 = 365.0 * 24.0 * 3600.0;

/// Configuration for one MSI measurement run.
///
/// Intervals are in nanoseconds, every time field is in (possibly fractional)
/// seconds and both thresholds are ratios in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchOptions {
    /// Minimum TX interval to test for
    #[serde(default = "default_interval_min")]
    pub interval_min: Nanoseconds,

    /// Maximum TX interval to test for
    #[serde(default = "default_interval_max")]
    pub interval_max: Nanoseconds,

    /// TX interval step
    #[serde(default = "default_interval_step")]
    pub interval_step: Nanoseconds,

    /// Expected number of requests per trial
    #[serde(default = "default_tx_count")]
    pub tx_count: u64,

    /// Minimum trial duration (secs)
    #[serde(default = "default_tx_duration_min")]
    pub tx_duration_min: f64,

    /// Maximum trial duration (secs)
    #[serde(default = "default_tx_duration_max")]
    pub tx_duration_max: f64,

    /// Delay before each generator run (secs)
    #[serde(default = "default_before_start_time")]
    pub before_start_time: f64,

    /// No early failure during this period after start (secs)
    #[serde(default = "default_warmup_time")]
    pub warmup_time: f64,

    /// Linger between stopping TX and reading final counters (secs)
    #[serde(default = "default_cooldown_time")]
    pub cooldown_time: f64,

    /// How often counters are sampled during a trial (secs)
    #[serde(default = "default_read_counters_freq")]
    pub read_counters_freq: f64,

    /// Pass if the final satisfy ratio is at least this
    #[serde(default = "default_satisfy_threshold")]
    pub satisfy_threshold: f64,

    /// Early-fail if a sampled satisfy ratio drops below this
    #[serde(default = "default_early_fail_threshold")]
    pub early_fail_threshold: f64,
}

const fn default_interval_min() -> Nanoseconds {
    500
}

const fn default_interval_max() -> Nanoseconds {
    3500
}

const fn default_interval_step() -> Nanoseconds {
    1
}

const fn default_tx_count() -> u64 {
    24_000_000
}

const fn default_tx_duration_min() -> f64 {
    15.0
}

const fn default_tx_duration_max() -> f64 {
    60.0
}

const fn default_before_start_time() -> f64 {
    4.0
}

const fn default_warmup_time() -> f64 {
    5.0
}

const fn default_cooldown_time() -> f64 {
    2.0
}

const fn default_read_counters_freq() -> f64 {
    1.0
}

const fn default_satisfy_threshold() -> f64 {
    0.999
}

const fn default_early_fail_threshold() -> f64 {
    0.970
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            interval_min: default_interval_min(),
            interval_max: default_interval_max(),
            interval_step: default_interval_step(),
            tx_count: default_tx_count(),
            tx_duration_min: default_tx_duration_min(),
            tx_duration_max: default_tx_duration_max(),
            before_start_time: default_before_start_time(),
            warmup_time: default_warmup_time(),
            cooldown_time: default_cooldown_time(),
            read_counters_freq: default_read_counters_freq(),
            satisfy_threshold: default_satisfy_threshold(),
            early_fail_threshold: default_early_fail_threshold(),
        }
    }
}

/// Partial [`SearchOptions`]: unset fields keep the value they are merged over.
///
/// Serializing skips unset fields, so an overrides value can be layered as a
/// figment provider without clobbering lower layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchOptionsOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_min: Option<Nanoseconds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_max: Option<Nanoseconds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_step: Option<Nanoseconds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_duration_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_duration_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warmup_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_counters_freq: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfy_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_fail_threshold: Option<f64>,
}

impl SearchOptionsOverrides {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl SearchOptions {
    /// Merge overrides over the documented defaults.
    pub fn merged(overrides: &SearchOptionsOverrides) -> Self {
        Self::default().with_overrides(overrides)
    }

    /// Merge overrides over `self`, field by field.
    #[must_use]
    pub fn with_overrides(self, o: &SearchOptionsOverrides) -> Self {
        Self {
            interval_min: o.interval_min.unwrap_or(self.interval_min),
            interval_max: o.interval_max.unwrap_or(self.interval_max),
            interval_step: o.interval_step.unwrap_or(self.interval_step),
            tx_count: o.tx_count.unwrap_or(self.tx_count),
            tx_duration_min: o.tx_duration_min.unwrap_or(self.tx_duration_min),
            tx_duration_max: o.tx_duration_max.unwrap_or(self.tx_duration_max),
            before_start_time: o.before_start_time.unwrap_or(self.before_start_time),
            warmup_time: o.warmup_time.unwrap_or(self.warmup_time),
            cooldown_time: o.cooldown_time.unwrap_or(self.cooldown_time),
            read_counters_freq: o.read_counters_freq.unwrap_or(self.read_counters_freq),
            satisfy_threshold: o.satisfy_threshold.unwrap_or(self.satisfy_threshold),
            early_fail_threshold: o.early_fail_threshold.unwrap_or(self.early_fail_threshold),
        }
    }

    /// Check the options can drive a search.
    ///
    /// `interval_min > interval_max` is accepted: it yields an empty candidate
    /// range and a degenerate result rather than an error.
    pub fn validate(&self) -> DomainResult<()> {
        if self.interval_step == 0 {
            return Err(DomainError::InvalidOptions(
                "interval_step must be greater than 0".to_string(),
            ));
        }

        for (name, value) in [
            ("satisfy_threshold", self.satisfy_threshold),
            ("early_fail_threshold", self.early_fail_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DomainError::InvalidOptions(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        for (name, value) in [
            ("tx_duration_min", self.tx_duration_min),
            ("tx_duration_max", self.tx_duration_max),
            ("before_start_time", self.before_start_time),
            ("warmup_time", self.warmup_time),
            ("cooldown_time", self.cooldown_time),
            ("read_counters_freq", self.read_counters_freq),
        ] {
            if !(0.0..=MAX_SECONDS).contains(&value) {
                return Err(DomainError::InvalidOptions(format!(
                    "{name} must be between 0 and {MAX_SECONDS} seconds, got {value}"
                )));
            }
        }

        if self.read_counters_freq == 0.0 {
            return Err(DomainError::InvalidOptions(
                "read_counters_freq must be greater than 0".to_string(),
            ));
        }

        if self.tx_duration_min > self.tx_duration_max {
            return Err(DomainError::InvalidOptions(format!(
                "tx_duration_min ({}) must not exceed tx_duration_max ({})",
                self.tx_duration_min, self.tx_duration_max
            )));
        }

        Ok(())
    }

    /// The ordered candidate intervals.
    pub const fn candidate_range(&self) -> CandidateRange {
        CandidateRange::new(self.interval_min, self.interval_max, self.interval_step)
    }

    /// Nominal time to emit `tx_count` requests at `interval`, clamped to the
    /// configured duration window.
    pub fn tx_duration(&self, interval: Nanoseconds) -> Duration {
        let nominal = interval as f64 * self.tx_count as f64 / 1e9;
        secs(nominal.clamp(self.tx_duration_min, self.tx_duration_max))
    }

    pub fn before_start(&self) -> Duration {
        secs(self.before_start_time)
    }

    pub fn warmup(&self) -> Duration {
        secs(self.warmup_time)
    }

    pub fn cooldown(&self) -> Duration {
        secs(self.cooldown_time)
    }

    pub fn read_counters_every(&self) -> Duration {
        secs(self.read_counters_freq)
    }
}

/// Seconds to `Duration`. Validated options are always within
/// `[0, MAX_SECONDS]`, which converts exactly.
fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}
