//! Agent: one candidate solution in the population.
//!
//! An agent owns its position together with the per-variable bounds it must
//! respect, so it can clip itself without consulting the search space. The
//! dimension is fixed at construction: positions are only ever exposed as
//! slices, never as growable vectors.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{OptimizeError, Result};

/// A decision vector with bounds and a cached fitness value.
///
/// Fitness starts at `+inf`, which is worse than any real objective value,
/// so the first evaluation always registers as an improvement.
///
/// # Example
///
/// ```
/// use metaswarm::core::Agent;
///
/// let mut agent = Agent::with_bounds(vec![-10.0], vec![10.0]).unwrap();
/// agent.position_mut()[0] = 20.0;
/// agent.clip();
/// assert_eq!(agent.position()[0], 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    position: Vec<f64>,
    lower_bound: Vec<f64>,
    upper_bound: Vec<f64>,
    fitness: f64,
}

impl Agent {
    /// Create an agent of `dimension` variables at the origin with zero bounds.
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            position: vec![0.0; dimension],
            lower_bound: vec![0.0; dimension],
            upper_bound: vec![0.0; dimension],
            fitness: f64::INFINITY,
        }
    }

    /// Create an agent with the given bounds, positioned at the lower bound.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds differ in length, are non-finite, or
    /// `lower[i] > upper[i]` for some `i`.
    pub fn with_bounds(lower_bound: Vec<f64>, upper_bound: Vec<f64>) -> Result<Self> {
        validate_bounds(&lower_bound, &upper_bound)?;
        Ok(Self {
            position: lower_bound.clone(),
            lower_bound,
            upper_bound,
            fitness: f64::INFINITY,
        })
    }

    /// Number of decision variables.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.position.len()
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Mutable access to the position. Length cannot change.
    pub fn position_mut(&mut self) -> &mut [f64] {
        &mut self.position
    }

    /// Overwrite the position from a slice of the same dimension.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizeError::DimensionMismatch`] if the lengths differ.
    pub fn set_position(&mut self, position: &[f64]) -> Result<()> {
        if position.len() != self.position.len() {
            return Err(OptimizeError::dimension_mismatch(
                "agent position",
                self.position.len(),
                position.len(),
            ));
        }
        self.position.copy_from_slice(position);
        Ok(())
    }

    /// Per-variable lower bounds.
    #[must_use]
    pub fn lower_bound(&self) -> &[f64] {
        &self.lower_bound
    }

    /// Per-variable upper bounds.
    #[must_use]
    pub fn upper_bound(&self) -> &[f64] {
        &self.upper_bound
    }

    /// Cached objective value at the current position.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Overwrite the cached objective value.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Record bounds on the agent. Only the search space rebuilds bounds.
    pub(crate) fn set_bounds(&mut self, lower_bound: &[f64], upper_bound: &[f64]) {
        self.lower_bound.copy_from_slice(lower_bound);
        self.upper_bound.copy_from_slice(upper_bound);
    }

    /// Exchange position and fitness with `other`; bounds stay put.
    pub(crate) fn exchange(&mut self, other: &mut Agent) {
        std::mem::swap(&mut self.position, &mut other.position);
        std::mem::swap(&mut self.fitness, &mut other.fitness);
    }

    /// Clamp every variable into `[lower, upper]` in place.
    pub fn clip(&mut self) {
        for ((x, &lo), &hi) in self
            .position
            .iter_mut()
            .zip(&self.lower_bound)
            .zip(&self.upper_bound)
        {
            *x = x.clamp(lo, hi);
        }
    }

    /// Whether every variable lies inside its bounds.
    #[must_use]
    pub fn is_within_bounds(&self) -> bool {
        self.position
            .iter()
            .zip(&self.lower_bound)
            .zip(&self.upper_bound)
            .all(|((&x, &lo), &hi)| lo <= x && x <= hi)
    }

    /// Order two agents by ascending fitness (lower is better).
    ///
    /// Uses IEEE total ordering so `+inf` sorts last and `NaN` never panics.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }

    /// Whether this agent is strictly better than `other`.
    #[must_use]
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.fitness < other.fitness
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for x in &self.position {
            write!(f, " {x:>6.2}")?;
        }
        write!(f, " ]  fitness = {:.4}", self.fitness)
    }
}

/// Check that two bound vectors describe a valid box.
pub(crate) fn validate_bounds(lower_bound: &[f64], upper_bound: &[f64]) -> Result<()> {
    if lower_bound.len() != upper_bound.len() {
        return Err(OptimizeError::dimension_mismatch(
            "upper bound",
            lower_bound.len(),
            upper_bound.len(),
        ));
    }
    for (index, (&lower, &upper)) in lower_bound.iter().zip(upper_bound).enumerate() {
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(OptimizeError::InvalidBounds {
                index,
                lower,
                upper,
            });
        }
    }
    Ok(())
}
