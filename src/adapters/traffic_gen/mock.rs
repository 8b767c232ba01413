//! Mock traffic generator for testing.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{GeneratorCounters, Nanoseconds};
use crate::domain::ports::TrafficGen;

/// Satisfy ratio for a given interval and per-trial sample index.
pub type RatioFn = dyn Fn(Nanoseconds, usize) -> f64 + Send + Sync;

/// A command the mock received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorCall {
    Start(Nanoseconds),
    Stop(Duration),
    ReadCounters,
}

/// Command at which the mock reports a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    Start,
    Stop,
    ReadCounters,
}

/// Scripted generator.
///
/// The ratio it reports is a pure function of the running interval and the
/// number of samples taken since the last `start`, so runs are reproducible.
/// `n_requests` in the returned counters is that sample number (1-based),
/// letting tests tell snapshots apart.
pub struct MockTrafficGen {
    ratio: Box<RatioFn>,
    interval: Option<Nanoseconds>,
    samples: usize,
    calls: Vec<GeneratorCall>,
    fail_on: Option<FailurePoint>,
}

impl MockTrafficGen {
    pub fn from_fn(ratio: impl Fn(Nanoseconds, usize) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            ratio: Box::new(ratio),
            interval: None,
            samples: 0,
            calls: Vec::new(),
            fail_on: None,
        }
    }

    /// Same ratio for every interval and sample.
    pub fn always(ratio: f64) -> Self {
        Self::from_fn(move |_, _| ratio)
    }

    /// Fully satisfied at `threshold` and above, nothing satisfied below.
    pub fn passing_at_or_above(threshold: Nanoseconds) -> Self {
        Self::from_fn(move |interval, _| if interval >= threshold { 1.0 } else { 0.0 })
    }

    /// Ratios by sample index within each trial; the last one repeats.
    pub fn with_ratio_sequence(ratios: Vec<f64>) -> Self {
        Self::from_fn(move |_, sample| {
            ratios
                .get(sample)
                .or_else(|| ratios.last())
                .copied()
                .unwrap_or(0.0)
        })
    }

    /// Fail every call of the given command.
    #[must_use]
    pub const fn fail_on(mut self, point: FailurePoint) -> Self {
        self.fail_on = Some(point);
        self
    }

    pub fn calls(&self) -> &[GeneratorCall] {
        &self.calls
    }

    /// Intervals passed to `start`, in order.
    pub fn started_intervals(&self) -> Vec<Nanoseconds> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                GeneratorCall::Start(interval) => Some(*interval),
                _ => None,
            })
            .collect()
    }

    pub fn start_count(&self) -> usize {
        self.count(|call| matches!(call, GeneratorCall::Start(_)))
    }

    pub fn stop_count(&self) -> usize {
        self.count(|call| matches!(call, GeneratorCall::Stop(_)))
    }

    pub fn read_count(&self) -> usize {
        self.count(|call| matches!(call, GeneratorCall::ReadCounters))
    }

    fn count(&self, pred: impl Fn(&GeneratorCall) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    fn check(&self, point: FailurePoint, operation: &'static str) -> DomainResult<()> {
        if self.fail_on == Some(point) {
            return Err(DomainError::generator(operation, "injected failure"));
        }
        Ok(())
    }
}

impl fmt::Debug for MockTrafficGen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTrafficGen")
            .field("interval", &self.interval)
            .field("samples", &self.samples)
            .field("calls", &self.calls)
            .field("fail_on", &self.fail_on)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TrafficGen for MockTrafficGen {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn start(&mut self, interval: Nanoseconds) -> DomainResult<()> {
        self.calls.push(GeneratorCall::Start(interval));
        self.check(FailurePoint::Start, "start")?;
        self.interval = Some(interval);
        self.samples = 0;
        Ok(())
    }

    async fn stop(&mut self, linger: Duration) -> DomainResult<()> {
        self.calls.push(GeneratorCall::Stop(linger));
        self.check(FailurePoint::Stop, "stop")
    }

    async fn read_counters(&mut self) -> DomainResult<GeneratorCounters> {
        self.calls.push(GeneratorCall::ReadCounters);
        self.check(FailurePoint::ReadCounters, "read_counters")?;
        let ratio = (self.ratio)(self.interval.unwrap_or(0), self.samples);
        self.samples += 1;
        Ok(GeneratorCounters {
            n_requests: self.samples as u64,
            ..GeneratorCounters::with_ratio(ratio)
        })
    }
}
