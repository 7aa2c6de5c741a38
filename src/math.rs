//! Numeric helpers for the path tracker

use core::ops::Range;

use nalgebra::DVector;

/// Per-sample integration intervals in seconds
///
/// Entry `i` is the time covered by sample `i`, that is `t[i + 1] - t[i]`.
/// The final sample has no successor and takes `fallback`, as does every
/// sample when no timestamps are available.
pub fn sample_intervals(
    timestamps: Option<&DVector<f64>>,
    len: usize,
    fallback: f64,
) -> DVector<f64> {
    match timestamps {
        Some(times) if times.len() == len => DVector::from_fn(len, |i, _| {
            if i + 1 < len {
                times[i + 1] - times[i]
            } else {
                fallback
            }
        }),
        _ => DVector::from_element(len, fallback),
    }
}

/// Rectangular integral of `rates` over the sample `range`
///
/// Each sample contributes `rate × interval`. The range end is exclusive.
pub fn rectangular_integral(
    rates: &DVector<f64>,
    intervals: &DVector<f64>,
    range: Range<usize>,
) -> f64 {
    if range.start >= range.end {
        return 0.0;
    }
    rates.rows_range(range.clone()).dot(&intervals.rows_range(range))
}
