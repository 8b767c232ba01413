//! msibench - Maximum Sustainable Interval measurement
//!
//! msibench finds the smallest inter-request transmission interval at which a
//! request generator's responses are still satisfied above a target ratio. It
//! binary searches a range of candidate intervals, running one timed trial per
//! step against a live generator and sampling its counters for early failure.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Search options, verdicts, results and the
//!   [`TrafficGen`] port
//! - **Service Layer** (`services`): [`TrialRunner`] and [`IntervalSearchController`]
//! - **Adapters** (`adapters`): JSON-RPC, simulated and mock generators
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use msibench::adapters::traffic_gen::SimulatedTrafficGen;
//! use msibench::{IntervalSearchController, SearchOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut generator = SimulatedTrafficGen::new(1800);
//!     let controller = IntervalSearchController::new(SearchOptions::default())?;
//!     let result = controller.measure(&mut generator).await?;
//!     println!("MSI: {:?}", result.msi);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    CandidateRange, GeneratorCounters, MeasureResult, MeasurementReport, Nanoseconds,
    SearchOptions, SearchOptionsOverrides, TrialVerdict,
};
pub use domain::ports::TrafficGen;
pub use infrastructure::config::{Config, ConfigError, ConfigLoader};
pub use services::{measure, IntervalSearchController, TrialRunner};
