//! Distance measures between positions.

use crate::error::{OptimizeError, Result};

/// Euclidean distance between two positions.
///
/// ```text
/// d(a, b) = sqrt(Σ(a_i - b_i)²)
/// ```
///
/// # Errors
///
/// Returns [`OptimizeError::DimensionMismatch`] if the lengths differ.
pub fn euclidean(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(OptimizeError::dimension_mismatch(
            "euclidean distance",
            a.len(),
            b.len(),
        ));
    }
    Ok(a.iter()
        .zip(b)
        .map(|(&x, &y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt())
}
