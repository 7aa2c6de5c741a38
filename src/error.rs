//! Error types for the path tracker

/// Precondition failures detected while building or querying a tracker
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackerError {
    #[error("motion series contains no samples")]
    EmptySeries,

    #[error("{column} column has {actual} samples, expected {expected}")]
    LengthMismatch {
        column: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("timestamps must increase strictly, sample {index} does not")]
    NonMonotonicTimestamps { index: usize },

    #[error("sample range {start}..{end} is outside a series of {len} samples")]
    IndexOutOfRange { start: usize, end: usize, len: usize },

    #[error("turn detection requires gyroscope samples")]
    MissingGyroscope,

    #[error("{name} standard deviation must be finite and non-negative, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("invalid tracker setting {name}: {reason}")]
    InvalidSettings {
        name: &'static str,
        reason: &'static str,
    },
}

/// Result type alias using TrackerError
pub type TrackerResult<T> = Result<T, TrackerError>;
