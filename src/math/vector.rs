//! Element-wise vector operations.

use crate::error::{OptimizeError, Result};

/// Element-wise `a - b`.
///
/// # Errors
///
/// Vectors of different lengths are non-conformable and rejected rather
/// than truncated.
pub fn subtract(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    if a.len() != b.len() {
        return Err(OptimizeError::dimension_mismatch("subtract", a.len(), b.len()));
    }
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}
