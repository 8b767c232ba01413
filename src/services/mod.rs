//! Search services: the trial oracle and the interval search driving it.

pub mod interval_search;
pub mod trial_runner;

pub use interval_search::{measure, IntervalSearchController};
pub use trial_runner::TrialRunner;
