//! Turn angle estimation and rounding

use nalgebra::DVector;

use crate::math::rectangular_integral;
use crate::turns::TurnWindow;
use crate::types::{Direction, TrackerSettings, TurnEstimate};

/// Integrated angle of a window in degrees
///
/// Every sample of the window except the last contributes
/// `rate × interval`; the last sample is the boundary the excursion returns
/// to.
pub fn window_degrees(rates: &DVector<f64>, intervals: &DVector<f64>, window: &TurnWindow) -> f64 {
    rectangular_integral(rates, intervals, window.start..window.end).to_degrees()
}

/// Round an angle to whole increments, keeping its sign
///
/// The magnitude is split into whole increments and a remainder. The
/// remainder counts as a full increment when it falls short of one by no
/// more than `margin`, so with the default 45° increment and 9° margin the
/// cut-over sits at 36° (and at 81°, 126°, ...) rather than at the
/// midpoint.
///
/// # Example
/// ```
/// use path_tracker::round_to_increment;
///
/// assert_eq!(round_to_increment(90.0, 45.0, 9.0), 90.0);
/// assert_eq!(round_to_increment(40.0, 45.0, 9.0), 45.0);
/// assert_eq!(round_to_increment(35.9, 45.0, 9.0), 0.0);
/// assert_eq!(round_to_increment(-36.0, 45.0, 9.0), -45.0);
/// ```
pub fn round_to_increment(degrees: f64, increment: f64, margin: f64) -> f64 {
    if !degrees.is_finite() || increment <= 0.0 {
        return 0.0;
    }

    let magnitude = degrees.abs();
    let whole = (magnitude / increment).floor();
    let remainder = magnitude - whole * increment;
    let mut estimate = whole * increment;
    if remainder > 0.0 && remainder >= increment - margin {
        estimate += increment;
    }

    if degrees < 0.0 { -estimate } else { estimate }
}

/// Classify an integrated angle as a turn
///
/// Angles beyond `±minimum_turn_degrees` (exclusive) are turns; anything
/// smaller is sensor wander and yields `None`.
pub fn classify_turn(raw_degrees: f64, settings: &TrackerSettings) -> Option<TurnEstimate> {
    let direction = if raw_degrees > settings.minimum_turn_degrees {
        Direction::Clockwise
    } else if raw_degrees < -settings.minimum_turn_degrees {
        Direction::CounterClockwise
    } else {
        return None;
    };

    if !raw_degrees.is_finite() {
        return None;
    }

    let degrees = round_to_increment(
        raw_degrees,
        settings.turn_increment_degrees,
        settings.round_up_margin_degrees,
    )
    .abs();

    Some(TurnEstimate {
        raw_degrees,
        degrees,
        direction,
    })
}
