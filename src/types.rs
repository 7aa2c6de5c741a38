//! Core types and settings for the path tracker

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};

/// Time base used when integrating the gyroscope rate
///
/// # Example
/// ```
/// use path_tracker::{Integration, TrackerSettings};
///
/// let settings = TrackerSettings {
///     integration: Integration::FixedInterval,
///     ..Default::default()
/// };
/// assert_eq!(settings.sample_period, 0.005);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Integration {
    /// Use the delta between consecutive timestamps
    ///
    /// Falls back to [`TrackerSettings::sample_period`] when the series
    /// carries no timestamps.
    #[default]
    TimestampDeltas,
    /// Always use [`TrackerSettings::sample_period`]
    FixedInterval,
}

/// Path tracker settings
///
/// Every tuning constant of the step and turn detectors. The defaults
/// reproduce the calibrated behaviour for a phone carried face up with
/// samples taken every 5 ms.
///
/// # Example
/// ```
/// use path_tracker::TrackerSettings;
///
/// let settings = TrackerSettings {
///     step_run_length: 8,     // shorter peaks at a lower sample rate
///     sample_period: 0.01,    // 100 Hz
///     ..Default::default()
/// };
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackerSettings {
    /// Resting vertical acceleration in m/s²
    pub base_gravity: f64,
    /// Multiple of the acceleration standard deviation added to gravity
    /// to form the step threshold
    pub step_threshold_factor: f64,
    /// Consecutive samples above the step threshold that confirm a step
    pub step_run_length: usize,
    /// Gyroscope magnitude (rad/s) below which the rate counts as zero
    ///
    /// Near-zero samples delimit turn windows.
    pub near_zero_band: f64,
    /// Multiple of the gyroscope standard deviation that opens a turn window
    pub turn_threshold_factor: f64,
    /// Integrated angle (degrees) a window must exceed to count as a turn
    pub minimum_turn_degrees: f64,
    /// Granularity of reported turn angles in degrees
    pub turn_increment_degrees: f64,
    /// Remainder (degrees) short of a full increment that still rounds up
    pub round_up_margin_degrees: f64,
    /// Sample period in seconds used by fixed-interval integration
    pub sample_period: f64,
    /// Integration time base
    pub integration: Integration,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            base_gravity: 9.82,
            step_threshold_factor: 0.5,
            step_run_length: 10,
            near_zero_band: 0.05,
            turn_threshold_factor: 1.0,
            minimum_turn_degrees: 36.0,
            turn_increment_degrees: 45.0,
            round_up_margin_degrees: 9.0,
            sample_period: 0.005,
            integration: Integration::default(),
        }
    }
}

impl TrackerSettings {
    /// Check that the settings describe a usable detector
    pub fn validate(&self) -> TrackerResult<()> {
        fn invalid(name: &'static str, reason: &'static str) -> TrackerResult<()> {
            Err(TrackerError::InvalidSettings { name, reason })
        }

        if !self.base_gravity.is_finite() {
            return invalid("base_gravity", "must be finite");
        }
        if !(self.step_threshold_factor.is_finite() && self.turn_threshold_factor.is_finite()) {
            return invalid("threshold_factor", "must be finite");
        }
        if self.step_run_length == 0 {
            return invalid("step_run_length", "must be at least one sample");
        }
        if !(self.near_zero_band >= 0.0 && self.near_zero_band.is_finite()) {
            return invalid("near_zero_band", "must be finite and non-negative");
        }
        if !self.minimum_turn_degrees.is_finite() {
            return invalid("minimum_turn_degrees", "must be finite");
        }
        if !(self.turn_increment_degrees > 0.0 && self.turn_increment_degrees.is_finite()) {
            return invalid("turn_increment_degrees", "must be finite and positive");
        }
        if !(self.round_up_margin_degrees >= 0.0
            && self.round_up_margin_degrees < self.turn_increment_degrees)
        {
            return invalid(
                "round_up_margin_degrees",
                "must be non-negative and smaller than the increment",
            );
        }
        if !(self.sample_period > 0.0 && self.sample_period.is_finite()) {
            return invalid("sample_period", "must be finite and positive");
        }
        Ok(())
    }
}

/// Per-session detection thresholds
///
/// Standard deviations of the smoothed vertical acceleration and of the
/// vertical gyroscope rate, computed upstream over the whole recording.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Thresholds {
    /// Standard deviation of the acceleration signal (m/s²)
    pub accel_std_dev: f64,
    /// Standard deviation of the gyroscope signal (rad/s)
    pub gyro_std_dev: f64,
}

impl Thresholds {
    pub fn new(accel_std_dev: f64, gyro_std_dev: f64) -> Self {
        Self {
            accel_std_dev,
            gyro_std_dev,
        }
    }

    pub(crate) fn validate(&self) -> TrackerResult<()> {
        let columns = [
            ("acceleration", self.accel_std_dev),
            ("gyroscope", self.gyro_std_dev),
        ];
        for (name, value) in columns {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(TrackerError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }
}

/// Turn direction seen from above
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Positive gyroscope rate
    Clockwise,
    /// Negative gyroscope rate
    CounterClockwise,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Clockwise => f.write_str("CW"),
            Direction::CounterClockwise => f.write_str("CCW"),
        }
    }
}

/// A classified turn
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TurnEstimate {
    /// Integrated angle before rounding, signed
    pub raw_degrees: f64,
    /// Rounded magnitude, a multiple of the turn increment
    pub degrees: f64,
    pub direction: Direction,
}

/// One entry of the path log
///
/// `Display` renders the entry in the textual form consumed by reporting
/// tools.
///
/// # Example
/// ```
/// use path_tracker::{Direction, PathSegment};
///
/// let walked = PathSegment::Walked { steps: 12 };
/// let turned = PathSegment::Turned { degrees: 90.0, direction: Direction::Clockwise };
///
/// assert_eq!(walked.to_string(), "WALKED 12 STEPS");
/// assert_eq!(turned.to_string(), "TURNED 90.0 DEGREES CW");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathSegment {
    Walked { steps: usize },
    Turned { degrees: f64, direction: Direction },
}

impl From<TurnEstimate> for PathSegment {
    fn from(turn: TurnEstimate) -> Self {
        PathSegment::Turned {
            degrees: turn.degrees,
            direction: turn.direction,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Walked { steps } => write!(f, "WALKED {steps} STEPS"),
            PathSegment::Turned { degrees, direction } => {
                write!(f, "TURNED {degrees:.1} DEGREES {direction}")
            }
        }
    }
}
