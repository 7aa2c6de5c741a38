use path_tracker::{MotionSeries, PathTracker, Thresholds, TrackerError};
use std::f64::consts::PI;

const SAMPLE_PERIOD: f64 = 0.005; // 5 ms sample period

fn main() -> Result<(), TrackerError> {
    let mut acceleration = Vec::new();
    let mut gyroscope = Vec::new();

    // replace this with recorded smoothed accel_z (m/s²) and gyro_z (rad/s)
    for stride in 0..12 {
        for k in 0..100 {
            let impact = if k < 30 { 1.2 } else { -0.4 };
            acceleration.push(9.82 + impact);
            // a quarter turn to the right during the sixth stride: a half-sine
            // of peak π²/2 rad/s over 0.5 s integrates to π/2
            let rate = if stride == 5 {
                PI * PI / 2.0 * (PI * k as f64 / 100.0).sin()
            } else {
                0.0
            };
            gyroscope.push(rate);
        }
    }
    let timestamps = (0..acceleration.len()).map(|i| i as f64 * SAMPLE_PERIOD).collect();

    let series = MotionSeries::new(timestamps, acceleration, gyroscope)?;
    let mut tracker = PathTracker::new(series, Thresholds::new(0.8, 0.9))?;

    tracker.count_turns(0)?;

    println!("Steps: {}", tracker.total_steps());
    println!("Turns: {}", tracker.confirmed_turns());
    for entry in tracker.track_user() {
        println!("{entry}");
    }

    Ok(())
}
