use serde::{Deserialize, Serialize};

use super::Nanoseconds;

/// Ordered candidate intervals `min, min + step, ... <= max`.
///
/// Indexed arithmetically, so a fine step over a wide window costs nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRange {
    min: Nanoseconds,
    max: Nanoseconds,
    step: Nanoseconds,
}

impl CandidateRange {
    /// `step` must be positive; a zero step is treated as an empty range.
    pub const fn new(min: Nanoseconds, max: Nanoseconds, step: Nanoseconds) -> Self {
        Self { min, max, step }
    }

    /// Number of candidates. Exact for any bounds, up to `2^64` for
    /// `0..=u64::MAX` at step 1.
    pub const fn count(&self) -> u128 {
        if self.min > self.max || self.step == 0 {
            return 0;
        }
        ((self.max - self.min) / self.step) as u128 + 1
    }

    pub const fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Interval at `index`, if inside the range.
    pub const fn get(&self, index: u128) -> Option<Nanoseconds> {
        if index >= self.count() {
            return None;
        }
        // index * step <= max - min, so neither operation overflows
        Some(self.min + index as Nanoseconds * self.step)
    }

    pub fn iter(&self) -> impl Iterator<Item = Nanoseconds> + '_ {
        (0..self.count()).map_while(|i| self.get(i))
    }
}
