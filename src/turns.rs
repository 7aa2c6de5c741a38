//! Turn window detection from the vertical gyroscope rate
//!
//! A turn window opens when the rate breaks through ±σ of the gyroscope
//! signal and closes at the next near-zero sample. The window always begins
//! at the most recent near-zero sample before the breakout, so it spans the
//! full excursion that the angle estimator integrates.

use nalgebra::DVector;

use crate::types::Direction;

/// Detector state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    /// No turn in progress
    #[default]
    Idle,
    /// A candidate window is open, with the direction of the breakout
    InTurn(Direction),
}

/// A closed candidate window over the inclusive sample range `start..=end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnWindow {
    pub start: usize,
    pub end: usize,
    /// Direction of the threshold breakout that opened the window
    pub candidate: Direction,
}

impl TurnWindow {
    /// Number of samples in the window
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false, a window holds at least the breakout sample
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Iterator over the turn windows of a gyroscope column
///
/// Per sample `i`:
/// 1. a near-zero rate closes an open window (yielding `[start, i - 1]`)
///    and restarts accumulation at `i`;
/// 2. while idle, a rate above `+threshold` or below `-threshold` opens a
///    clockwise or counter-clockwise candidate.
///
/// A window still open when the samples run out is never yielded.
///
/// # Example
/// ```
/// use nalgebra::DVector;
/// use path_tracker::{Direction, TurnWindow, TurnWindows};
///
/// let rates = DVector::from_vec(vec![0.0, 0.3, 1.5, 1.2, 0.2, 0.01, 0.0]);
/// let windows: Vec<TurnWindow> = TurnWindows::new(&rates, 0, 0.05, 1.0).collect();
///
/// assert_eq!(
///     windows,
///     vec![TurnWindow { start: 0, end: 4, candidate: Direction::Clockwise }]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TurnWindows<'a> {
    rates: &'a DVector<f64>,
    /// Next sample to examine
    index: usize,
    /// First sample of the accumulating window
    window_start: usize,
    state: TurnState,
    near_zero_band: f64,
    threshold: f64,
}

impl<'a> TurnWindows<'a> {
    /// Scan `rates` from `start_index` to the end
    ///
    /// # Arguments
    /// * `near_zero_band` - magnitude below which a rate counts as zero
    /// * `threshold` - magnitude a rate must exceed to open a window
    pub fn new(
        rates: &'a DVector<f64>,
        start_index: usize,
        near_zero_band: f64,
        threshold: f64,
    ) -> Self {
        Self {
            rates,
            index: start_index,
            window_start: start_index,
            state: TurnState::Idle,
            near_zero_band,
            threshold,
        }
    }

    /// Current detector state
    pub fn state(&self) -> TurnState {
        self.state
    }
}

impl Iterator for TurnWindows<'_> {
    type Item = TurnWindow;

    fn next(&mut self) -> Option<TurnWindow> {
        while self.index < self.rates.len() {
            let i = self.index;
            self.index += 1;
            let rate = self.rates[i];
            let mut closed = None;

            if rate.abs() < self.near_zero_band {
                if let TurnState::InTurn(candidate) = self.state {
                    // an open window holds at least its breakout sample, so i > window_start
                    closed = Some(TurnWindow {
                        start: self.window_start,
                        end: i - 1,
                        candidate,
                    });
                    self.state = TurnState::Idle;
                }
                self.window_start = i;
            }

            if self.state == TurnState::Idle {
                if rate > self.threshold {
                    self.state = TurnState::InTurn(Direction::Clockwise);
                } else if rate < -self.threshold {
                    self.state = TurnState::InTurn(Direction::CounterClockwise);
                }
            }

            if closed.is_some() {
                return closed;
            }
        }
        None
    }
}
