use path_tracker::{MotionSeries, PathSegment, PathTracker, Thresholds};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

const SAMPLE_COUNT: usize = 4000;

/// Generate a recording of noisy walking with occasional random turns
fn generate_recording(seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut acceleration = Vec::with_capacity(SAMPLE_COUNT);
    let mut gyroscope = Vec::with_capacity(SAMPLE_COUNT);

    while acceleration.len() < SAMPLE_COUNT {
        if rng.random_bool(0.1) {
            // turn between 20° and 200° in either direction
            let samples = rng.random_range(40..250);
            let peak = rng.random_range(1.0..3.0) * if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            for k in 0..samples {
                let phase = core::f64::consts::PI * k as f64 / samples as f64;
                gyroscope.push(peak * phase.sin());
                acceleration.push(9.6 + rng.random_range(-0.3..0.3));
            }
        } else {
            // one stride with a variable impact length
            let impact = rng.random_range(5..20);
            for _ in 0..impact {
                acceleration.push(10.8 + rng.random_range(-0.2..0.2));
                gyroscope.push(rng.random_range(-0.04..0.04));
            }
            for _ in 0..rng.random_range(5..15) {
                acceleration.push(9.3 + rng.random_range(-0.2..0.2));
                gyroscope.push(rng.random_range(-0.04..0.04));
            }
        }
    }

    acceleration.truncate(SAMPLE_COUNT);
    gyroscope.truncate(SAMPLE_COUNT);
    (acceleration, gyroscope)
}

fn tracker(seed: u64) -> PathTracker {
    let (acceleration, gyroscope) = generate_recording(seed);
    let series = MotionSeries::without_timestamps(acceleration, gyroscope).unwrap();
    PathTracker::new(series, Thresholds::new(0.7, 0.8)).unwrap()
}

#[test]
fn test_step_count_monotonic_for_random_recordings() {
    for seed in 0..8 {
        let tracker = tracker(seed);
        let mut previous = 0;
        for end in 0..=SAMPLE_COUNT {
            let steps = tracker.count_steps(0, end).unwrap();
            assert!(steps >= previous, "seed {seed}: count dropped at end {end}");
            previous = steps;
        }
    }
}

#[test]
fn test_step_counts_split_without_overcounting() {
    for seed in 0..8 {
        let tracker = tracker(seed);
        let mut rng = Pcg64::seed_from_u64(seed + 100);
        let whole = tracker.total_steps();

        for _ in 0..50 {
            let split = rng.random_range(0..=SAMPLE_COUNT);
            let parts = tracker.count_steps(0, split).unwrap()
                + tracker.count_steps(split, SAMPLE_COUNT).unwrap();
            // a split can only cut a run in two, and the tail then needs a full run of its own
            assert!(parts <= whole + 1, "seed {seed}: split at {split}");
            assert!(parts + 1 >= whole, "seed {seed}: split at {split}");
        }
    }
}

#[test]
fn test_random_sessions_keep_log_invariants() {
    for seed in 0..16 {
        let mut tracker = tracker(seed);
        tracker.count_turns(0).unwrap();

        let log = tracker.path_log();
        assert!(tracker.cursor() <= SAMPLE_COUNT);
        assert_eq!(log.len(), 2 * tracker.confirmed_turns() + 1, "seed {seed}");
        assert!(tracker.confirmed_turns() <= tracker.turns());

        // walked and turned entries alternate, ending with the trailing tally
        for (i, segment) in log.iter().enumerate() {
            match segment {
                PathSegment::Walked { .. } => assert_eq!(i % 2, 0, "seed {seed}"),
                PathSegment::Turned { degrees, .. } => {
                    assert_eq!(i % 2, 1, "seed {seed}");
                    assert!(*degrees >= 45.0);
                    assert_eq!(degrees % 45.0, 0.0);
                }
            }
        }

        // logged and pending steps never exceed what the recording holds
        let logged: usize = log
            .iter()
            .map(|segment| match segment {
                PathSegment::Walked { steps } => *steps,
                PathSegment::Turned { .. } => 0,
            })
            .sum();
        let pending: usize = tracker.pending_steps().iter().sum();
        assert!(
            logged + pending <= tracker.total_steps() + 2 * tracker.turns() + 1,
            "seed {seed}"
        );
    }
}
