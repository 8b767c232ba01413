//! Trial runner - one timed generator run at a fixed interval.

use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, instrument};

use crate::domain::errors::DomainResult;
use crate::domain::models::{Nanoseconds, SearchOptions, TrialVerdict};
use crate::domain::ports::TrafficGen;

/// Runs timed trials and judges them against the configured thresholds.
///
/// A trial:
/// 1. waits `before_start_time`, then starts the generator at the interval
/// 2. plans to run for `clamp(interval * tx_count / 1e9, tx_duration_min, tx_duration_max)`
/// 3. skips judgment for `warmup_time`
/// 4. samples counters every `read_counters_freq` until the planned end,
///    failing early once a ratio drops below both `early_fail_threshold` and
///    the previous sample
/// 5. stops with a `cooldown_time` linger and passes iff the final ratio
///    reaches `satisfy_threshold`
///
/// Generator errors abort the trial as they are; the generator may be left
/// running.
#[derive(Debug, Clone)]
pub struct TrialRunner {
    options: SearchOptions,
}

impl TrialRunner {
    /// Create a runner for validated options.
    pub fn new(options: SearchOptions) -> DomainResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub const fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Run one trial at `interval`. Starts and stops the generator exactly once.
    #[instrument(skip(self, generator), fields(generator = generator.name()))]
    pub async fn run_trial<G>(
        &self,
        generator: &mut G,
        interval: Nanoseconds,
    ) -> DomainResult<TrialVerdict>
    where
        G: TrafficGen + ?Sized,
    {
        let opt = &self.options;

        sleep(opt.before_start()).await;
        generator.start(interval).await?;

        let tx_duration = opt.tx_duration(interval);
        let end_time = Instant::now() + tx_duration;
        debug!(
            interval,
            tx_duration_secs = tx_duration.as_secs_f64(),
            "trial started"
        );

        sleep(opt.warmup()).await;

        // Ratchet: the early-fail bar is the lower of the fixed floor and the
        // previous sample, so a single dip below the floor is tolerated.
        let mut last_satisfy_ratio = 0.0_f64;
        while Instant::now() < end_time {
            let cnt = generator.read_counters().await?;
            if cnt.satisfy_ratio < opt.early_fail_threshold.min(last_satisfy_ratio) {
                info!(
                    interval,
                    satisfy_ratio = cnt.satisfy_ratio,
                    last_satisfy_ratio,
                    "early fail"
                );
                generator.stop(Duration::ZERO).await?;
                return Ok(TrialVerdict::early_fail(interval, cnt));
            }
            last_satisfy_ratio = cnt.satisfy_ratio;
            sleep(opt.read_counters_every()).await;
        }

        generator.stop(opt.cooldown()).await?;
        let cnt = generator.read_counters().await?;
        let passed = cnt.satisfy_ratio >= opt.satisfy_threshold;
        info!(
            interval,
            satisfy_ratio = cnt.satisfy_ratio,
            verdict = if passed { "pass" } else { "fail" },
            "trial finished"
        );
        Ok(TrialVerdict::completed(interval, passed, cnt))
    }
}
