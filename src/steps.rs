//! Step detection from vertical acceleration peaks

use crate::types::{Thresholds, TrackerSettings};

/// Run-length step detector
///
/// A step is a run of consecutive samples strictly above
/// `base_gravity + step_threshold_factor × σ_accel`. A run counts once, at
/// the instant it reaches `run_length` samples, no matter how long it lasts.
/// Any sample at or below the threshold ends the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepDetector {
    /// Acceleration a sample must exceed to extend a run (m/s²)
    threshold: f64,
    /// Run length that confirms a step
    run_length: usize,
}

impl StepDetector {
    /// Create a detector for a threshold and confirming run length
    ///
    /// # Example
    /// ```
    /// use path_tracker::StepDetector;
    ///
    /// let detector = StepDetector::new(10.0, 3);
    /// let samples = [10.5, 10.6, 10.4, 10.2, 9.0, 10.3, 10.1];
    /// assert_eq!(detector.count(&samples), 1);
    /// ```
    pub fn new(threshold: f64, run_length: usize) -> Self {
        Self {
            threshold,
            run_length,
        }
    }

    /// Create the detector described by the settings and session thresholds
    pub fn from_settings(settings: &TrackerSettings, thresholds: &Thresholds) -> Self {
        let threshold =
            settings.base_gravity + settings.step_threshold_factor * thresholds.accel_std_dev;
        Self::new(threshold, settings.step_run_length)
    }

    /// Count steps in a sequence of acceleration samples
    pub fn count<'a, I>(&self, samples: I) -> usize
    where
        I: IntoIterator<Item = &'a f64>,
    {
        let mut run = 0usize;
        let mut steps = 0usize;

        for &acceleration in samples {
            if acceleration > self.threshold {
                run += 1;
                if run == self.run_length {
                    steps += 1;
                }
            } else {
                run = 0;
            }
        }

        steps
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn run_length(&self) -> usize {
        self.run_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f64 = 10.0;
    const HIGH: f64 = 10.5;
    const LOW: f64 = 9.5;

    fn burst(len: usize) -> Vec<f64> {
        vec![HIGH; len]
    }

    #[test]
    fn test_threshold_from_settings() {
        let detector =
            StepDetector::from_settings(&TrackerSettings::default(), &Thresholds::new(1.2, 0.4));
        assert!((detector.threshold() - 10.42).abs() < 1e-12);
        assert_eq!(detector.run_length(), 10);
    }

    #[test]
    fn test_empty_input() {
        let detector = StepDetector::new(THRESHOLD, 10);
        assert_eq!(detector.count(&Vec::<f64>::new()), 0);
    }

    #[test]
    fn test_exact_run_counts_once() {
        let detector = StepDetector::new(THRESHOLD, 10);
        let mut samples = burst(10);
        samples.extend([LOW, LOW]);
        assert_eq!(detector.count(&samples), 1);
    }

    #[test]
    fn test_short_run_never_counts() {
        let detector = StepDetector::new(THRESHOLD, 10);
        let mut samples = burst(9);
        samples.push(LOW);
        samples.extend(burst(9));
        assert_eq!(detector.count(&samples), 0);
    }

    #[test]
    fn test_long_run_counts_once() {
        let detector = StepDetector::new(THRESHOLD, 10);
        assert_eq!(detector.count(&burst(35)), 1);
    }

    #[test]
    fn test_dip_separates_steps() {
        let detector = StepDetector::new(THRESHOLD, 10);
        let mut samples = burst(10);
        samples.push(LOW);
        samples.extend(burst(10));
        assert_eq!(detector.count(&samples), 2);
    }

    #[test]
    fn test_sample_at_threshold_breaks_run() {
        let detector = StepDetector::new(THRESHOLD, 10);
        let mut samples = burst(5);
        samples.push(THRESHOLD);
        samples.extend(burst(5));
        assert_eq!(detector.count(&samples), 0);
    }
}
