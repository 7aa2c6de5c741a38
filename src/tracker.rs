//! Path tracker: interleaves step counts and turns into a path log

use nalgebra::DVector;
use tracing::{debug, trace};

use crate::angle::{classify_turn, window_degrees};
use crate::error::{TrackerError, TrackerResult};
use crate::math::sample_intervals;
use crate::series::MotionSeries;
use crate::steps::StepDetector;
use crate::turns::{TurnWindow, TurnWindows};
use crate::types::{Integration, PathSegment, Thresholds, TrackerSettings};

/// One tracking session over a single motion series
///
/// Owns the series, its thresholds and everything a pass produces: the
/// path log, the turn counters, the log cursor and the pending step tally.
/// Sessions share nothing, so independent recordings can be tracked on
/// separate threads.
///
/// Steps and turns partition the timeline. The cursor marks the last
/// sample already accounted for in the log and only moves forward; each
/// step count starts at the cursor, so no sample is counted twice.
///
/// # Example
/// ```
/// use path_tracker::{MotionSeries, PathTracker, Thresholds};
///
/// let series = MotionSeries::steps_only(vec![9.8; 20])?;
/// let tracker = PathTracker::new(series, Thresholds::new(0.5, 0.5))?;
///
/// assert_eq!(tracker.count_steps(0, 20)?, 0);
/// # Ok::<(), path_tracker::TrackerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PathTracker {
    settings: TrackerSettings,
    series: MotionSeries,
    thresholds: Thresholds,
    /// Step detector derived from settings and thresholds
    step_detector: StepDetector,
    /// Integration interval per sample (seconds)
    intervals: DVector<f64>,
    /// Closed threshold windows in the latest pass
    turns: usize,
    /// Windows logged as turns in the latest pass
    confirmed_turns: usize,
    /// Last sample index covered by the log
    cursor: usize,
    /// Step counts waiting for the next confirmed turn
    pending_steps: Vec<usize>,
    path_log: Vec<PathSegment>,
}

impl PathTracker {
    /// Create a tracker with default settings
    pub fn new(series: MotionSeries, thresholds: Thresholds) -> TrackerResult<Self> {
        Self::with_settings(series, thresholds, TrackerSettings::default())
    }

    /// Create a tracker with specified settings
    pub fn with_settings(
        series: MotionSeries,
        thresholds: Thresholds,
        settings: TrackerSettings,
    ) -> TrackerResult<Self> {
        settings.validate()?;
        thresholds.validate()?;

        let timestamps = match settings.integration {
            Integration::TimestampDeltas => series.timestamps(),
            Integration::FixedInterval => None,
        };
        let intervals = sample_intervals(timestamps, series.len(), settings.sample_period);
        let step_detector = StepDetector::from_settings(&settings, &thresholds);

        Ok(Self {
            settings,
            series,
            thresholds,
            step_detector,
            intervals,
            turns: 0,
            confirmed_turns: 0,
            cursor: 0,
            pending_steps: Vec::new(),
            path_log: Vec::new(),
        })
    }

    /// Count steps over the half-open sample range `start_index..end_index`
    ///
    /// Runs are not carried across the range boundaries: a run that begins
    /// before `start_index` is only seen from `start_index` onwards.
    ///
    /// # Errors
    /// [`TrackerError::IndexOutOfRange`] when `start_index > end_index` or
    /// `end_index` exceeds the series length.
    pub fn count_steps(&self, start_index: usize, end_index: usize) -> TrackerResult<usize> {
        let len = self.series.len();
        if start_index > end_index || end_index > len {
            return Err(TrackerError::IndexOutOfRange {
                start: start_index,
                end: end_index,
                len,
            });
        }
        Ok(self.steps_between(start_index, end_index))
    }

    /// Steps across the whole series
    pub fn total_steps(&self) -> usize {
        self.steps_between(0, self.series.len())
    }

    /// Detect turns from `start_index` to the end of the series
    ///
    /// Resets the turn counters, appends one `WALKED`/`TURNED` pair to the
    /// path log per confirmed turn, and finishes with a `WALKED` entry for
    /// the samples after the last logged turn. The trailing entry is
    /// appended even when it holds zero steps. Windows starting before the
    /// cursor were covered by an earlier pass and are skipped.
    ///
    /// `start_index` only bounds the window scan. Step tallies run from the
    /// cursor, which starts at 0 on a fresh tracker, so the first `WALKED`
    /// entry of `count_turns(k)` also covers the samples before `k`.
    ///
    /// Step tallies gathered ahead of rejected windows are carried into the
    /// next confirmed turn. Tallies still pending when the pass ends stay
    /// out of the log and remain visible through
    /// [`pending_steps`](Self::pending_steps).
    ///
    /// # Errors
    /// [`TrackerError::MissingGyroscope`] for a step-only series and
    /// [`TrackerError::IndexOutOfRange`] when `start_index` exceeds the
    /// series length.
    pub fn count_turns(&mut self, start_index: usize) -> TrackerResult<()> {
        let len = self.series.len();
        if start_index > len {
            return Err(TrackerError::IndexOutOfRange {
                start: start_index,
                end: len,
                len,
            });
        }
        let rates = self.series.gyroscope().ok_or(TrackerError::MissingGyroscope)?;

        let threshold = self.settings.turn_threshold_factor * self.thresholds.gyro_std_dev;
        let windows: Vec<TurnWindow> =
            TurnWindows::new(rates, start_index, self.settings.near_zero_band, threshold)
                .collect();

        self.turns = 0;
        self.confirmed_turns = 0;

        for window in &windows {
            if window.start < self.cursor {
                trace!(
                    start = window.start,
                    end = window.end,
                    cursor = self.cursor,
                    "window already covered by the path log"
                );
                continue;
            }
            self.turns += 1;
            self.map_window(window);
        }

        let trailing = self.steps_between(self.cursor, len);
        trace!(from = self.cursor, to = len, steps = trailing, "trailing step tally");
        self.path_log.push(PathSegment::Walked { steps: trailing });

        if !self.pending_steps.is_empty() {
            debug!(
                tallies = self.pending_steps.len(),
                steps = self.pending_steps.iter().sum::<usize>(),
                "pending step tallies not followed by a turn"
            );
        }

        Ok(())
    }

    /// Rendered path log entries in append order
    ///
    /// # Example
    /// ```
    /// use path_tracker::{MotionSeries, PathTracker, Thresholds};
    ///
    /// let series = MotionSeries::without_timestamps(vec![9.8; 50], vec![0.0; 50])?;
    /// let mut tracker = PathTracker::new(series, Thresholds::new(0.5, 0.5))?;
    /// tracker.count_turns(0)?;
    ///
    /// let path: Vec<String> = tracker.track_user().collect();
    /// assert_eq!(path, vec!["WALKED 0 STEPS"]);
    /// # Ok::<(), path_tracker::TrackerError>(())
    /// ```
    pub fn track_user(&self) -> impl Iterator<Item = String> + '_ {
        self.path_log.iter().map(ToString::to_string)
    }

    /// Typed path log entries in append order
    pub fn path_log(&self) -> &[PathSegment] {
        &self.path_log
    }

    /// Threshold windows closed during the latest pass, turns or not
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Windows logged as turns during the latest pass
    pub fn confirmed_turns(&self) -> usize {
        self.confirmed_turns
    }

    /// Last sample index covered by the path log
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Step tallies awaiting the next confirmed turn
    pub fn pending_steps(&self) -> &[usize] {
        &self.pending_steps
    }

    pub fn series(&self) -> &MotionSeries {
        &self.series
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn settings(&self) -> TrackerSettings {
        self.settings
    }

    /// Turn a closed window into log entries
    ///
    /// A confirmed turn flushes the pending tallies together with the steps
    /// walked up to the window and logs the turn. A rejected window only
    /// queues its step tally. Either way the cursor moves to the window's
    /// last sample, so steps taken inside a window are never logged.
    fn map_window(&mut self, window: &TurnWindow) {
        let raw_degrees = match self.series.gyroscope() {
            Some(rates) => window_degrees(rates, &self.intervals, window),
            None => return,
        };
        debug!(
            start = window.start,
            end = window.end,
            raw_degrees,
            "estimated turn angle"
        );

        let steps = self.steps_between(self.cursor, window.start);

        match classify_turn(raw_degrees, &self.settings) {
            Some(turn) => {
                let pending: usize = self.pending_steps.drain(..).sum();
                trace!(steps, pending, "flushing step tally before turn");
                self.path_log.push(PathSegment::Walked {
                    steps: steps + pending,
                });
                self.path_log.push(turn.into());
                self.confirmed_turns += 1;
                self.advance_cursor(window.end);
            }
            None => {
                trace!(steps, "deferring step tally, window is not a turn");
                self.pending_steps.push(steps);
                self.advance_cursor(window.end);
            }
        }
    }

    fn advance_cursor(&mut self, index: usize) {
        self.cursor = self.cursor.max(index);
    }

    /// Step count over an in-bounds range, zero when the range is empty
    fn steps_between(&self, start_index: usize, end_index: usize) -> usize {
        if start_index >= end_index {
            return 0;
        }
        self.step_detector
            .count(self.series.acceleration().rows_range(start_index..end_index).iter())
    }
}
