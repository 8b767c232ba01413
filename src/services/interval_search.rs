//! Interval search - binary search for the Maximum Sustainable Interval.
//!
//! Candidates are searched under the assumption that pass/fail is monotonic
//! in the interval: a larger interval offers less load and is at least as
//! likely to pass. The assumption is not checked. A generator that also fails
//! at large intervals (resource contention, for instance) leads to an MSI that
//! is not the true minimum.

use tracing::{debug, info, instrument, warn};

use super::trial_runner::TrialRunner;
use crate::domain::errors::DomainResult;
use crate::domain::models::{MeasureResult, SearchOptions, SearchOptionsOverrides};
use crate::domain::ports::TrafficGen;

/// Owns the candidate range and searches it with a [`TrialRunner`] as oracle.
#[derive(Debug, Clone)]
pub struct IntervalSearchController {
    runner: TrialRunner,
}

impl IntervalSearchController {
    /// Create a controller for validated options.
    pub fn new(options: SearchOptions) -> DomainResult<Self> {
        options.validate()?;
        if options.satisfy_threshold < options.early_fail_threshold {
            warn!(
                satisfy_threshold = options.satisfy_threshold,
                early_fail_threshold = options.early_fail_threshold,
                "satisfy threshold is below early-fail threshold"
            );
        }
        Ok(Self {
            runner: TrialRunner::new(options)?,
        })
    }

    /// Create a controller from overrides merged over the defaults.
    pub fn from_overrides(overrides: &SearchOptionsOverrides) -> DomainResult<Self> {
        Self::new(SearchOptions::merged(overrides))
    }

    pub const fn options(&self) -> &SearchOptions {
        self.runner.options()
    }

    pub const fn runner(&self) -> &TrialRunner {
        &self.runner
    }

    /// Search the candidate range for the smallest passing interval.
    ///
    /// An empty range returns underflow and overflow without touching the
    /// generator. Otherwise every step runs one full trial, at most
    /// `ceil(log2(N + 1))` of them for `N` candidates. A generator error
    /// aborts the search.
    #[instrument(skip_all, fields(generator = generator.name()))]
    pub async fn measure<G>(&self, generator: &mut G) -> DomainResult<MeasureResult>
    where
        G: TrafficGen + ?Sized,
    {
        let range = self.options().candidate_range();
        if range.is_empty() {
            info!(
                interval_min = self.options().interval_min,
                interval_max = self.options().interval_max,
                "empty candidate range"
            );
            return Ok(MeasureResult::empty_range());
        }

        // up to 2^64 candidates; signed so right can step below zero
        let n = range.count() as i128;
        let mut left: i128 = 0;
        let mut right: i128 = n - 1;
        let mut res = MeasureResult::empty_range();

        while left <= right {
            let mid = left + (right - left) / 2;
            let (Some(lo), Some(interval), Some(hi)) = (
                range.get(left as u128),
                range.get(mid as u128),
                range.get(right as u128),
            ) else {
                break;
            };
            debug!(
                "range=[{lo}...{interval}...{hi}] rem-runs={}",
                ceil_log2((right - left + 1) as u128)
            );

            let verdict = self.runner.run_trial(generator, interval).await?;
            if verdict.passed {
                right = mid - 1;
                res.msi = Some(interval);
                res.counters = Some(verdict.counters);
            } else {
                left = mid + 1;
            }
            res.trials.push(verdict);
        }

        res.is_underflow = res.msi.is_none();
        res.is_overflow = left >= n;
        info!(
            msi = res.msi,
            is_underflow = res.is_underflow,
            is_overflow = res.is_overflow,
            trials = res.trials.len(),
            "measurement finished"
        );
        Ok(res)
    }
}

/// Measure with `overrides` merged over the default options.
pub async fn measure<G>(
    generator: &mut G,
    overrides: &SearchOptionsOverrides,
) -> DomainResult<MeasureResult>
where
    G: TrafficGen + ?Sized,
{
    IntervalSearchController::from_overrides(overrides)?
        .measure(generator)
        .await
}

const fn ceil_log2(n: u128) -> u32 {
    if n <= 1 {
        0
    } else {
        u128::BITS - (n - 1).leading_zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::traffic_gen::MockTrafficGen;
    use crate::domain::errors::DomainError;

    fn stepped_options() -> SearchOptions {
        SearchOptions {
            interval_min: 500,
            interval_max: 3500,
            interval_step: 500,
            tx_duration_min: 2.0,
            tx_duration_max: 2.0,
            before_start_time: 0.0,
            warmup_time: 0.0,
            cooldown_time: 0.0,
            read_counters_freq: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_ceil_log2() {
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(4), 2);
        assert_eq!(ceil_log2(5), 3);
        assert_eq!(ceil_log2(3001), 12);
        assert_eq!(ceil_log2(1u128 << 64), 64);
    }

    #[tokio::test(start_paused = true)]
    async fn test_probes_midpoint_first() {
        let controller = IntervalSearchController::new(stepped_options()).unwrap();
        let mut gen = MockTrafficGen::passing_at_or_above(2000);

        let res = controller.measure(&mut gen).await.unwrap();

        // 2000 passes, then 1000 fails, then 1500 fails
        assert_eq!(gen.started_intervals(), vec![2000, 1000, 1500]);
        assert_eq!(res.msi, Some(2000));
        assert_eq!(res.trials.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_candidate_pass() {
        let opt = SearchOptions {
            interval_min: 1000,
            interval_max: 1000,
            ..stepped_options()
        };
        let controller = IntervalSearchController::new(opt).unwrap();
        let mut gen = MockTrafficGen::always(1.0);

        let res = controller.measure(&mut gen).await.unwrap();

        assert_eq!(res.msi, Some(1000));
        assert!(!res.is_underflow);
        assert!(!res.is_overflow);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_candidate_fail() {
        let opt = SearchOptions {
            interval_min: 1000,
            interval_max: 1000,
            ..stepped_options()
        };
        let controller = IntervalSearchController::new(opt).unwrap();
        let mut gen = MockTrafficGen::always(0.0);

        let res = controller.measure(&mut gen).await.unwrap();

        assert_eq!(res.msi, None);
        assert!(res.is_underflow);
        assert!(res.is_overflow);
    }

    #[tokio::test(start_paused = true)]
    async fn test_passing_counters_are_kept() {
        let controller = IntervalSearchController::new(stepped_options()).unwrap();
        let mut gen = MockTrafficGen::from_fn(|interval, _| if interval >= 2000 {
            interval as f64 / 4000.0 + 0.5
        } else {
            0.0
        });

        let res = controller.measure(&mut gen).await.unwrap();

        // 2000 -> 1.0, while later failing trials must not overwrite it
        assert_eq!(res.msi, Some(2000));
        let cnt = res.counters.unwrap();
        assert!((cnt.satisfy_ratio - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_width_range_is_searched() {
        let opt = SearchOptions {
            interval_min: 0,
            interval_max: u64::MAX,
            interval_step: 1,
            ..stepped_options()
        };
        let controller = IntervalSearchController::new(opt).unwrap();
        let mut gen = MockTrafficGen::passing_at_or_above(1 << 63);

        let res = controller.measure(&mut gen).await.unwrap();

        assert_eq!(res.msi, Some(1 << 63));
        assert!(!res.is_underflow);
        assert!(!res.is_overflow);
        assert!(res.trials.len() <= 65);
    }

    #[tokio::test(start_paused = true)]
    async fn test_range_longer_than_i64_all_pass() {
        let opt = SearchOptions {
            interval_min: 1,
            interval_max: u64::MAX,
            interval_step: 1,
            ..stepped_options()
        };
        let controller = IntervalSearchController::new(opt).unwrap();
        let mut gen = MockTrafficGen::always(1.0);

        let res = controller.measure(&mut gen).await.unwrap();

        assert_eq!(res.msi, Some(1));
        assert!(!res.is_underflow);
        assert!(!res.is_overflow);
        assert_eq!(gen.started_intervals().first(), Some(&(1 + (u64::MAX - 1) / 2)));
    }

    #[tokio::test]
    async fn test_invalid_options_rejected() {
        let err = IntervalSearchController::from_overrides(&SearchOptionsOverrides {
            interval_step: Some(0),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidOptions(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_measure_entry_point_merges_overrides() {
        let mut gen = MockTrafficGen::always(1.0);
        let overrides = SearchOptionsOverrides {
            interval_min: Some(100),
            interval_max: Some(400),
            interval_step: Some(100),
            tx_duration_min: Some(1.0),
            tx_duration_max: Some(1.0),
            before_start_time: Some(0.0),
            warmup_time: Some(0.0),
            cooldown_time: Some(0.0),
            ..Default::default()
        };

        let res = measure(&mut gen, &overrides).await.unwrap();

        assert_eq!(res.msi, Some(100));
    }
}
