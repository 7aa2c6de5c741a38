//! Advanced path tracking demonstration
//!
//! Loads a recorded session from CSV, tracks the walked path with
//! diagnostics enabled and plots the gyroscope trace with every detected
//! turn window.
//!
//! Features demonstrated:
//! - Ingestion of timestamp, smoothed accel_z and gyro_z columns
//! - Session thresholds computed from the recording
//! - Custom tracker settings
//! - `tracing` diagnostics of each window's raw angle (`RUST_LOG=path_tracker=debug`)
//! - SVG plot of the gyroscope rate with confirmed and rejected windows
//!
//! Run with: `cargo run --example advanced [path/to/recording.csv]`

use path_tracker::{
    Integration, MotionSeries, PathTracker, Thresholds, TrackerSettings, TurnWindow, TurnWindows,
    classify_turn, sample_intervals, window_degrees,
};
use plotters::prelude::*;
use serde::Deserialize;
use std::error::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct SensorData {
    #[serde(rename = "timestamp")]
    time: f64,
    #[serde(rename = "smooth_accel_z")]
    accel_z: f64,
    #[serde(rename = "gyro_z")]
    gyro_z: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("path_tracker=debug")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "testdata/walking_and_turning.csv".to_string());
    println!("Path tracking example - loading {path}");

    let mut reader = csv::Reader::from_path(&path)?;
    let mut sensor_data = Vec::new();
    for result in reader.deserialize() {
        let record: SensorData = result?;
        sensor_data.push(record);
    }

    let series = MotionSeries::new(
        sensor_data.iter().map(|d| d.time).collect(),
        sensor_data.iter().map(|d| d.accel_z).collect(),
        sensor_data.iter().map(|d| d.gyro_z).collect(),
    )?;

    // Session thresholds are the population standard deviations of each column
    let thresholds = Thresholds::new(
        series.acceleration().variance().sqrt(),
        series.gyroscope().map_or(0.0, |g| g.variance().sqrt()),
    );
    println!(
        "Thresholds: accel σ = {:.4} m/s², gyro σ = {:.4} rad/s",
        thresholds.accel_std_dev, thresholds.gyro_std_dev
    );

    let settings = TrackerSettings {
        integration: Integration::TimestampDeltas, // integrate over recorded deltas
        step_run_length: 10,                       // 50 ms above threshold confirms a step
        ..Default::default()
    };

    let mut tracker = PathTracker::with_settings(series, thresholds, settings)?;
    tracker.count_turns(0)?;

    println!("Processed {} samples", tracker.series().len());
    println!("Total steps: {}", tracker.total_steps());
    println!(
        "Threshold windows: {}, confirmed turns: {}",
        tracker.turns(),
        tracker.confirmed_turns()
    );
    if !tracker.pending_steps().is_empty() {
        println!("Steps not followed by a turn: {:?}", tracker.pending_steps());
    }

    println!("Path:");
    for entry in tracker.track_user() {
        println!("  {entry}");
    }

    create_plot(&sensor_data, &tracker)?;
    println!("Plot written to path_tracking.svg");

    Ok(())
}

/// Plot the gyroscope rate, shading confirmed turns red and rejected
/// windows grey
fn create_plot(sensor_data: &[SensorData], tracker: &PathTracker) -> Result<(), Box<dyn Error>> {
    let Some(rates) = tracker.series().gyroscope() else {
        return Ok(());
    };
    let settings = tracker.settings();
    let threshold = settings.turn_threshold_factor * tracker.thresholds().gyro_std_dev;
    let windows: Vec<TurnWindow> =
        TurnWindows::new(rates, 0, settings.near_zero_band, threshold).collect();
    let intervals = sample_intervals(
        tracker.series().timestamps(),
        rates.len(),
        settings.sample_period,
    );

    let root = SVGBackend::new("path_tracking.svg", (1200, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let (Some(first), Some(last)) = (sensor_data.first(), sensor_data.last()) else {
        return Ok(());
    };
    let peak = rates.iter().fold(0.0f64, |acc, r| acc.max(r.abs())).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(first.time..last.time, -peak * 1.1..peak * 1.1)?;

    for window in &windows {
        let degrees = window_degrees(rates, &intervals, window);
        let style = match classify_turn(degrees, &settings) {
            Some(_) => RED.mix(0.2).filled(),
            None => BLACK.mix(0.1).filled(),
        };
        chart.draw_series(std::iter::once(Rectangle::new(
            [
                (sensor_data[window.start].time, -peak * 1.1),
                (sensor_data[window.end].time, peak * 1.1),
            ],
            style,
        )))?;
    }

    chart.draw_series(LineSeries::new(
        sensor_data.iter().map(|d| (d.time, d.gyro_z)),
        &BLUE,
    ))?;

    chart.draw_series(LineSeries::new(
        [(first.time, threshold), (last.time, threshold)],
        &GREEN,
    ))?;
    chart.draw_series(LineSeries::new(
        [(first.time, -threshold), (last.time, -threshold)],
        &GREEN,
    ))?;

    root.present()?;
    Ok(())
}
