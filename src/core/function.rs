//! Objective function adapter.
//!
//! Wraps an externally supplied `&[f64] -> f64` mapping. The engine never
//! inspects it, never caches it and never retries it: every call to
//! [`Function::calculate`] recomputes.

use std::cell::Cell;
use std::fmt;

use crate::error::{BoxError, OptimizeError, Result};

type Objective = Box<dyn Fn(&[f64]) -> std::result::Result<f64, BoxError>>;

/// A named objective function to be minimized.
///
/// # Example
///
/// ```
/// use metaswarm::core::Function;
///
/// let sphere = Function::new("sphere", |x: &[f64]| x.iter().map(|xi| xi * xi).sum());
/// assert_eq!(sphere.calculate(&[3.0, 4.0]).unwrap(), 25.0);
/// assert_eq!(sphere.evaluations(), 1);
/// ```
pub struct Function {
    name: String,
    pointer: Objective,
    evaluations: Cell<usize>,
}

impl Function {
    /// Wrap an infallible objective.
    pub fn new<F>(name: impl Into<String>, objective: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + 'static,
    {
        Self {
            name: name.into(),
            pointer: Box::new(move |x: &[f64]| Ok(objective(x))),
            evaluations: Cell::new(0),
        }
    }

    /// Wrap an objective that may fail. Failures abort the run and surface
    /// as [`OptimizeError::Objective`] with the original error as source.
    pub fn fallible<F, E>(name: impl Into<String>, objective: F) -> Self
    where
        F: Fn(&[f64]) -> std::result::Result<f64, E> + 'static,
        E: Into<BoxError>,
    {
        Self {
            name: name.into(),
            pointer: Box::new(move |x: &[f64]| objective(x).map_err(Into::into)),
            evaluations: Cell::new(0),
        }
    }

    /// Evaluate the objective at `position`.
    ///
    /// # Errors
    ///
    /// Propagates the objective's own failure.
    pub fn calculate(&self, position: &[f64]) -> Result<f64> {
        self.evaluations.set(self.evaluations.get() + 1);
        (self.pointer)(position).map_err(|source| OptimizeError::Objective {
            function: self.name.clone(),
            source,
        })
    }

    /// Function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of calls to [`Function::calculate`] so far.
    #[must_use]
    pub fn evaluations(&self) -> usize {
        self.evaluations.get()
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("evaluations", &self.evaluations.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_passes_through() {
        let f = Function::new("sum", |x: &[f64]| x.iter().sum());
        assert_eq!(f.calculate(&[1.0, 2.0, 3.5]).expect("infallible"), 6.5);
        assert_eq!(f.name(), "sum");
    }

    #[test]
    fn test_every_call_recomputes() {
        let f = Function::new("const", |_: &[f64]| 1.0);
        for _ in 0..5 {
            f.calculate(&[0.0]).expect("infallible");
        }
        assert_eq!(f.evaluations(), 5);
    }

    #[test]
    fn test_fallible_error_propagates() {
        let f = Function::fallible("log", |x: &[f64]| {
            if x[0] <= 0.0 {
                Err("log of non-positive value")
            } else {
                Ok(x[0].ln())
            }
        });
        assert!(f.calculate(&[1.0]).is_ok());
        let err = f.calculate(&[-1.0]).unwrap_err();
        assert!(matches!(err, OptimizeError::Objective { ref function, .. } if function == "log"));
    }

    #[test]
    fn test_debug_does_not_expose_closure() {
        let f = Function::new("sphere", |_: &[f64]| 0.0);
        assert!(format!("{f:?}").contains("sphere"));
    }
}
