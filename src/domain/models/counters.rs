use serde::{Deserialize, Serialize};

/// Snapshot of a generator's request counters.
///
/// `satisfy_ratio` is what the search reads; the totals are carried along for
/// reporting. Generators that only know a ratio leave the totals at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GeneratorCounters {
    /// Requests sent
    pub n_requests: u64,
    /// Requests answered with a satisfying response
    pub n_satisfied: u64,
    /// Requests answered with a negative acknowledgement
    pub n_nacks: u64,
    /// Fraction of sent requests that were satisfied, in `[0, 1]`
    pub satisfy_ratio: f64,
}

impl GeneratorCounters {
    /// Build counters from totals, deriving the satisfy ratio.
    ///
    /// No requests sent yields a ratio of 0.
    pub fn from_totals(n_requests: u64, n_satisfied: u64, n_nacks: u64) -> Self {
        let satisfy_ratio = if n_requests == 0 {
            0.0
        } else {
            (n_satisfied as f64 / n_requests as f64).min(1.0)
        };
        Self {
            n_requests,
            n_satisfied,
            n_nacks,
            satisfy_ratio,
        }
    }

    /// Counters carrying only a satisfy ratio, clamped into `[0, 1]`.
    pub fn with_ratio(satisfy_ratio: f64) -> Self {
        let satisfy_ratio = if satisfy_ratio.is_nan() {
            0.0
        } else {
            satisfy_ratio.clamp(0.0, 1.0)
        };
        Self {
            satisfy_ratio,
            ..Self::default()
        }
    }
}
