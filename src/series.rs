//! Index-aligned motion sample columns

use nalgebra::DVector;

use crate::error::{TrackerError, TrackerResult};

/// Aligned timestamp, vertical acceleration and vertical gyroscope columns
///
/// All columns share one index space. Construction rejects empty series,
/// columns of unequal length and timestamps that do not strictly increase,
/// so every index below [`len`](Self::len) is valid in every column.
///
/// # Example
/// ```
/// use path_tracker::MotionSeries;
///
/// let series = MotionSeries::new(
///     vec![0.000, 0.005, 0.010],
///     vec![9.81, 10.40, 9.70],
///     vec![0.00, 0.02, 0.01],
/// )?;
/// assert_eq!(series.len(), 3);
/// # Ok::<(), path_tracker::TrackerError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MotionSeries {
    /// Sample times in seconds
    timestamps: Option<DVector<f64>>,
    /// Smoothed vertical acceleration in m/s²
    acceleration: DVector<f64>,
    /// Vertical angular rate in rad/s
    gyroscope: Option<DVector<f64>>,
}

impl MotionSeries {
    /// Build a full series with timestamps, acceleration and gyroscope rate
    pub fn new(
        timestamps: Vec<f64>,
        acceleration: Vec<f64>,
        gyroscope: Vec<f64>,
    ) -> TrackerResult<Self> {
        Self::from_columns(Some(timestamps), acceleration, Some(gyroscope))
    }

    /// Build a series without timestamps
    ///
    /// Turn integration then uses the fixed sample period.
    pub fn without_timestamps(acceleration: Vec<f64>, gyroscope: Vec<f64>) -> TrackerResult<Self> {
        Self::from_columns(None, acceleration, Some(gyroscope))
    }

    /// Build a step-only series
    ///
    /// Step counting works as usual; turn detection reports
    /// [`TrackerError::MissingGyroscope`].
    pub fn steps_only(acceleration: Vec<f64>) -> TrackerResult<Self> {
        Self::from_columns(None, acceleration, None)
    }

    /// Build a series from optional columns
    pub fn from_columns(
        timestamps: Option<Vec<f64>>,
        acceleration: Vec<f64>,
        gyroscope: Option<Vec<f64>>,
    ) -> TrackerResult<Self> {
        let expected = acceleration.len();
        if expected == 0 {
            return Err(TrackerError::EmptySeries);
        }

        let check_len = |column: &'static str, values: &[f64]| {
            if values.len() == expected {
                Ok(())
            } else {
                Err(TrackerError::LengthMismatch {
                    column,
                    expected,
                    actual: values.len(),
                })
            }
        };

        if let Some(times) = &timestamps {
            check_len("timestamp", times)?;
            // NaN fails the comparison and is rejected with the rest
            if let Some(index) = times
                .windows(2)
                .position(|pair| !(pair[1] > pair[0]))
            {
                return Err(TrackerError::NonMonotonicTimestamps { index: index + 1 });
            }
        }
        if let Some(rates) = &gyroscope {
            check_len("gyroscope", rates)?;
        }

        Ok(Self {
            timestamps: timestamps.map(DVector::from_vec),
            acceleration: DVector::from_vec(acceleration),
            gyroscope: gyroscope.map(DVector::from_vec),
        })
    }

    /// Number of samples in every column
    pub fn len(&self) -> usize {
        self.acceleration.len()
    }

    /// Always false, construction rejects empty series
    pub fn is_empty(&self) -> bool {
        self.acceleration.is_empty()
    }

    pub fn timestamps(&self) -> Option<&DVector<f64>> {
        self.timestamps.as_ref()
    }

    pub fn acceleration(&self) -> &DVector<f64> {
        &self.acceleration
    }

    pub fn gyroscope(&self) -> Option<&DVector<f64>> {
        self.gyroscope.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_construction() {
        let series = MotionSeries::new(
            vec![0.0, 0.005, 0.01, 0.015],
            vec![9.8, 9.9, 10.0, 9.7],
            vec![0.0, 0.1, -0.1, 0.0],
        )
        .unwrap();

        assert_eq!(series.len(), 4);
        assert!(!series.is_empty());
        assert_eq!(series.acceleration()[2], 10.0);
        assert_eq!(series.gyroscope().unwrap()[1], 0.1);
        assert_eq!(series.timestamps().unwrap()[3], 0.015);
    }

    #[test]
    fn test_empty_series_rejected() {
        assert_eq!(MotionSeries::steps_only(vec![]), Err(TrackerError::EmptySeries));
        assert_eq!(
            MotionSeries::new(vec![], vec![], vec![]),
            Err(TrackerError::EmptySeries)
        );
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = MotionSeries::new(vec![0.0, 0.005], vec![9.8, 9.8, 9.8], vec![0.0; 3]);
        assert_eq!(
            result,
            Err(TrackerError::LengthMismatch {
                column: "timestamp",
                expected: 3,
                actual: 2,
            })
        );

        let result = MotionSeries::without_timestamps(vec![9.8; 3], vec![0.0; 4]);
        assert_eq!(
            result,
            Err(TrackerError::LengthMismatch {
                column: "gyroscope",
                expected: 3,
                actual: 4,
            })
        );
    }

    #[test]
    fn test_timestamps_must_increase() {
        let repeated = MotionSeries::new(vec![0.0, 0.005, 0.005], vec![9.8; 3], vec![0.0; 3]);
        assert_eq!(repeated, Err(TrackerError::NonMonotonicTimestamps { index: 2 }));

        let nan = MotionSeries::new(vec![0.0, f64::NAN, 0.01], vec![9.8; 3], vec![0.0; 3]);
        assert_eq!(nan, Err(TrackerError::NonMonotonicTimestamps { index: 1 }));
    }

    #[test]
    fn test_optional_columns() {
        let steps = MotionSeries::steps_only(vec![9.8; 5]).unwrap();
        assert!(steps.gyroscope().is_none());
        assert!(steps.timestamps().is_none());

        let untimed = MotionSeries::without_timestamps(vec![9.8; 5], vec![0.0; 5]).unwrap();
        assert!(untimed.timestamps().is_none());
        assert_eq!(untimed.gyroscope().map(|g| g.len()), Some(5));
    }
}
