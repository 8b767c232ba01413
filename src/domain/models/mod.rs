//! Domain models for MSI measurement.

pub mod candidate_range;
pub mod counters;
pub mod measurement;
pub mod search_options;

/// Transmission interval in nanoseconds.
pub type Nanoseconds = u64;

pub use candidate_range::CandidateRange;
pub use counters::GeneratorCounters;
pub use measurement::{MeasureResult, MeasurementReport, TrialVerdict};
pub use search_options::{SearchOptions, SearchOptionsOverrides};
