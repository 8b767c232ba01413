use msibench::adapters::traffic_gen::MockTrafficGen;
use msibench::{IntervalSearchController, MeasureResult, SearchOptions};
use proptest::prelude::*;

fn options(min: u64, step: u64, count: u64) -> SearchOptions {
    SearchOptions {
        interval_min: min,
        interval_max: min + step * (count - 1),
        interval_step: step,
        tx_duration_min: 1.0,
        tx_duration_max: 1.0,
        before_start_time: 0.0,
        warmup_time: 0.0,
        cooldown_time: 0.0,
        read_counters_freq: 1.0,
        ..Default::default()
    }
}

/// Run a search on a paused current-thread runtime so trial waits are instant.
fn run_search(opt: SearchOptions, gen: &mut MockTrafficGen) -> MeasureResult {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .expect("runtime");
    let controller = IntervalSearchController::new(opt).expect("valid options");
    rt.block_on(controller.measure(gen)).expect("measurement")
}

fn ceil_log2(n: u64) -> usize {
    (u64::BITS - (n - 1).leading_zeros()) as usize
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: with a monotone generator the search finds the smallest
    /// passing candidate in at most ceil(log2(N + 1)) trials.
    #[test]
    fn prop_monotone_search_finds_smallest_passing(
        min in 100u64..5_000,
        step in 1u64..1_000,
        count in 1u64..200,
        threshold_offset in 0u64..250,
    ) {
        let opt = options(min, step, count);
        let threshold = min + step * threshold_offset;
        let mut gen = MockTrafficGen::passing_at_or_above(threshold);

        let res = run_search(opt.clone(), &mut gen);

        let expected = opt.candidate_range().iter().find(|&c| c >= threshold);
        prop_assert_eq!(res.msi, expected);
        prop_assert!(res.trials.len() <= ceil_log2(count + 1));
        prop_assert_eq!(gen.start_count(), res.trials.len());
        prop_assert_eq!(res.is_underflow, expected.is_none());
        prop_assert_eq!(res.is_overflow, expected.is_none());
    }

    /// Property: the reported MSI always comes from a passing trial and
    /// carries that trial's counters.
    #[test]
    fn prop_msi_matches_a_passing_trial(
        step in 1u64..500,
        count in 1u64..64,
        ratios in proptest::collection::vec(0.9f64..=1.0, 1..8),
    ) {
        let opt = options(1_000, step, count);
        let mut gen = MockTrafficGen::from_fn(move |interval, _| {
            let i = (interval as usize / 7) % ratios.len();
            ratios[i]
        });

        let res = run_search(opt, &mut gen);

        match res.msi {
            Some(msi) => {
                let trial = res.trials.iter().find(|t| t.interval == msi);
                prop_assert!(trial.is_some_and(|t| t.passed));
                prop_assert_eq!(res.counters, trial.map(|t| t.counters));
                // nothing smaller passed
                prop_assert!(res.trials.iter().filter(|t| t.passed).all(|t| t.interval >= msi));
            }
            None => {
                prop_assert!(res.is_underflow);
                prop_assert!(res.trials.iter().all(|t| !t.passed));
            }
        }
    }
}
