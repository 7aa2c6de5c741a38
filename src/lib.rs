//! Path Tracker - pedestrian path inference from vertical motion sensors
//!
//! Reconstructs the path a pedestrian walked, as a log of straight-line
//! step counts and discrete turns, from two time-aligned streams recorded
//! by a phone carried face up: smoothed vertical (z-axis) acceleration and
//! vertical (z-axis) gyroscope rate. Processing is offline and single pass
//! over a complete recording.
//!
//! # Features
//!
//! - Step counting from sustained acceleration peaks above gravity
//! - Turn window detection from gyroscope threshold breakouts
//! - Turn angle estimation by rectangular integration, rounded to 45°
//! - Chronological path log that never counts a sample twice
//! - Integration over real timestamp deltas or a fixed sample period
//! - Optional `serde` support for settings and log entries
//!
//! # Quick Start
//!
//! ```rust
//! use path_tracker::{MotionSeries, PathTracker, Thresholds};
//!
//! // Upstream ingestion provides aligned columns and their standard deviations
//! let timestamps: Vec<f64> = (0..400).map(|i| i as f64 * 0.005).collect();
//! let acceleration = vec![9.81; 400];
//! let gyroscope = vec![0.0; 400];
//!
//! let series = MotionSeries::new(timestamps, acceleration, gyroscope)?;
//! let mut tracker = PathTracker::new(series, Thresholds::new(0.9, 0.6))?;
//!
//! tracker.count_turns(0)?;
//! for entry in tracker.track_user() {
//!     println!("{entry}");
//! }
//! # Ok::<(), path_tracker::TrackerError>(())
//! ```

pub mod angle;
mod error;
mod math;
mod series;
pub mod steps;
mod tracker;
pub mod turns;
mod types;

// Re-export all public types and functions
pub use angle::{classify_turn, round_to_increment, window_degrees};
pub use error::{TrackerError, TrackerResult};
pub use math::{rectangular_integral, sample_intervals};
pub use series::MotionSeries;
pub use steps::StepDetector;
pub use tracker::PathTracker;
pub use turns::{TurnState, TurnWindow, TurnWindows};
pub use types::*;
