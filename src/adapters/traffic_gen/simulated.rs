//! Simulated traffic generator backed by a fixed-capacity model.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{GeneratorCounters, Nanoseconds};
use crate::domain::ports::TrafficGen;

#[derive(Debug, Clone, Copy)]
struct Run {
    interval: Nanoseconds,
    started_at: Instant,
    stopped_at: Option<Instant>,
}

/// Generator modelling a responder that can serve one request every
/// `capacity` nanoseconds.
///
/// Sending slower than capacity is fully satisfied; sending faster satisfies
/// `interval / capacity` of the requests. Counters are cleared on every
/// `start` and accumulate with (tokio) elapsed time, so the model runs under
/// paused test time too.
#[derive(Debug, Clone)]
pub struct SimulatedTrafficGen {
    capacity: Nanoseconds,
    run: Option<Run>,
}

impl SimulatedTrafficGen {
    pub const fn new(capacity: Nanoseconds) -> Self {
        Self {
            capacity,
            run: None,
        }
    }

    pub const fn capacity(&self) -> Nanoseconds {
        self.capacity
    }

    /// Steady-state satisfy ratio at `interval`.
    pub fn ratio_at(&self, interval: Nanoseconds) -> f64 {
        if interval >= self.capacity {
            1.0
        } else {
            interval as f64 / self.capacity as f64
        }
    }
}

#[async_trait]
impl TrafficGen for SimulatedTrafficGen {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn start(&mut self, interval: Nanoseconds) -> DomainResult<()> {
        if interval == 0 {
            return Err(DomainError::generator("start", "interval must be positive"));
        }
        debug!(interval, capacity = self.capacity, "simulated generator started");
        self.run = Some(Run {
            interval,
            started_at: Instant::now(),
            stopped_at: None,
        });
        Ok(())
    }

    async fn stop(&mut self, linger: Duration) -> DomainResult<()> {
        let Some(run) = self.run.as_mut() else {
            return Err(DomainError::generator("stop", "generator is not running"));
        };
        run.stopped_at.get_or_insert_with(Instant::now);
        tokio::time::sleep(linger).await;
        Ok(())
    }

    async fn read_counters(&mut self) -> DomainResult<GeneratorCounters> {
        let Some(run) = self.run else {
            return Ok(GeneratorCounters::default());
        };
        let until = run.stopped_at.unwrap_or_else(Instant::now);
        let elapsed = until.saturating_duration_since(run.started_at);
        let sent = (elapsed.as_nanos() / u128::from(run.interval)) as u64;
        let satisfied = (sent as f64 * self.ratio_at(run.interval)).floor() as u64;
        Ok(GeneratorCounters::from_totals(sent, satisfied, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_model() {
        let gen = SimulatedTrafficGen::new(2000);
        assert!((gen.ratio_at(4000) - 1.0).abs() < f64::EPSILON);
        assert!((gen.ratio_at(2000) - 1.0).abs() < f64::EPSILON);
        assert!((gen.ratio_at(1000) - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn test_counters_accumulate_while_running() {
        let mut gen = SimulatedTrafficGen::new(2000);
        gen.start(1000).await.unwrap();

        tokio::time::sleep(Duration::from_millis(1)).await;
        let cnt = gen.read_counters().await.unwrap();

        assert_eq!(cnt.n_requests, 1000);
        assert_eq!(cnt.n_satisfied, 500);
        assert!((cnt.satisfy_ratio - 0.5).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_counters_freeze_after_stop() {
        let mut gen = SimulatedTrafficGen::new(500);
        gen.start(1000).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        gen.stop(Duration::from_secs(1)).await.unwrap();

        let cnt = gen.read_counters().await.unwrap();
        assert_eq!(cnt.n_requests, 2000);
        assert_eq!(cnt.n_satisfied, 2000);
    }

    #[tokio::test]
    async fn test_stop_without_start_fails() {
        let mut gen = SimulatedTrafficGen::new(500);
        assert!(gen.stop(Duration::ZERO).await.is_err());
    }

    #[tokio::test]
    async fn test_zero_interval_rejected() {
        let mut gen = SimulatedTrafficGen::new(500);
        assert!(gen.start(0).await.is_err());
    }
}
