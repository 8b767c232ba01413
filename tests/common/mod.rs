//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

use msibench::SearchOptions;

/// Options over `500..=3500` in steps of 500 with short, fixed-length trials.
///
/// Trials last 3s with 1s sampling and no pre-roll, warmup or cooldown, so
/// under paused tokio time a full search completes instantly.
#[allow(dead_code)]
pub fn stepped_options() -> SearchOptions {
    SearchOptions {
        interval_min: 500,
        interval_max: 3500,
        interval_step: 500,
        tx_duration_min: 3.0,
        tx_duration_max: 3.0,
        before_start_time: 0.0,
        warmup_time: 0.0,
        cooldown_time: 0.0,
        read_counters_freq: 1.0,
        satisfy_threshold: 0.999,
        ..Default::default()
    }
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
