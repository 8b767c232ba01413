//! Traffic generator port - the capability the search drives.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::errors::DomainResult;
use crate::domain::models::{GeneratorCounters, Nanoseconds};

/// A request generator that can be started at a fixed interval, stopped and
/// sampled.
///
/// Commands are assumed to have taken effect when they return, so counters
/// read afterwards reflect them. Behaviour when `start` is called on a running
/// generator is up to the implementation.
///
/// Methods take `&mut self`: one measurement owns the generator exclusively
/// and no other actor may drive it meanwhile.
#[async_trait]
pub trait TrafficGen: Send {
    /// Short name for logs and reports.
    fn name(&self) -> &'static str;

    /// Begin emitting requests every `interval` nanoseconds.
    async fn start(&mut self, interval: Nanoseconds) -> DomainResult<()>;

    /// Cease new transmissions, waiting `linger` for in-flight requests
    /// before returning.
    async fn stop(&mut self, linger: Duration) -> DomainResult<()>;

    /// Snapshot the current counters.
    async fn read_counters(&mut self) -> DomainResult<GeneratorCounters>;
}
