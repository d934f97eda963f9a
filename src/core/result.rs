//! Optimization result record.

use serde::{Deserialize, Serialize};

/// Outcome of a search-space run.
///
/// `history` holds the global best fitness after the initial evaluation and
/// after every subsequent update, so it is non-increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Best position found.
    pub best_position: Vec<f64>,
    /// Objective value at `best_position`.
    pub best_fitness: f64,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,
    /// Objective evaluations performed during the run.
    pub evaluations: usize,
    /// Best fitness trace.
    pub history: Vec<f64>,
}

impl OptimizationResult {
    /// Number of recorded update rounds (excluding the initial evaluation).
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    /// Whether the best fitness never got worse across the run.
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        self.history.windows(2).all(|w| w[1] <= w[0] || w[0].is_nan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(history: Vec<f64>) -> OptimizationResult {
        OptimizationResult {
            best_position: vec![0.0],
            best_fitness: history.last().copied().unwrap_or(f64::INFINITY),
            elapsed_ms: 0,
            evaluations: 0,
            history,
        }
    }

    #[test]
    fn test_iterations_excludes_seed() {
        assert_eq!(result(vec![3.0, 2.0, 1.0]).iterations(), 2);
        assert_eq!(result(vec![]).iterations(), 0);
    }

    #[test]
    fn test_is_monotonic() {
        assert!(result(vec![f64::INFINITY, 3.0, 3.0, 1.0]).is_monotonic());
        assert!(!result(vec![1.0, 2.0]).is_monotonic());
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_string(&result(vec![1.0])).expect("serialize");
        assert!(json.contains("\"best_fitness\":1.0"));
        assert!(json.contains("\"elapsed_ms\":0"));
    }
}
