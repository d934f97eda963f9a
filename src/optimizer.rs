//! Top-level drivers bundling a search space, algorithm(s) and objective.
//!
//! [`Optimizer`] runs one metaheuristic over the whole population;
//! [`Hyperheuristic`] splits the population among several. Both are
//! single-shot: algorithms bind to their agents on the first `start` and
//! refuse a second decoration.

use std::time::Instant;

use tracing::info;

use crate::core::{Function, Metaheuristic, OptimizationResult, SearchSpace};
use crate::error::{OptimizeError, Result};

/// A single-algorithm optimization task.
///
/// # Example
///
/// ```
/// use metaswarm::core::{Function, SearchSpace};
/// use metaswarm::metaheuristics::{benchmarks, SineCosine};
/// use metaswarm::optimizer::Optimizer;
///
/// let space = SearchSpace::new(15, 2, 50).with_seed(7).continuous(-5.0, 5.0).unwrap();
/// let function = Function::new("sphere", benchmarks::sphere);
/// let algorithm = SineCosine::default().with_seed(7);
/// let mut optimizer = Optimizer::new(space, algorithm, function).unwrap();
///
/// let result = optimizer.start().unwrap();
/// assert_eq!(result.history.len(), 51);
/// ```
pub struct Optimizer {
    space: SearchSpace,
    metaheuristic: Box<dyn Metaheuristic>,
    function: Function,
}

impl Optimizer {
    /// Bundle a built space with an algorithm and an objective.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizeError::SpaceNotBuilt`] if `space` was never built.
    pub fn new(
        space: SearchSpace,
        metaheuristic: impl Metaheuristic + 'static,
        function: Function,
    ) -> Result<Self> {
        if !space.is_built() {
            return Err(OptimizeError::SpaceNotBuilt);
        }
        Ok(Self {
            space,
            metaheuristic: Box::new(metaheuristic),
            function,
        })
    }

    /// Run the task to completion.
    ///
    /// The returned `elapsed_ms` covers the whole run, decoration included.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`SearchSpace::run`].
    pub fn start(&mut self) -> Result<OptimizationResult> {
        let start = Instant::now();
        let mut result = self.space.run(self.metaheuristic.as_mut(), &self.function)?;
        result.elapsed_ms = elapsed_ms(start);
        info!(
            algorithm = self.metaheuristic.name(),
            elapsed_ms = result.elapsed_ms,
            "optimization task ended"
        );
        Ok(result)
    }

    /// The search space, including the final population.
    #[must_use]
    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    /// The wrapped algorithm.
    #[must_use]
    pub fn metaheuristic(&self) -> &dyn Metaheuristic {
        self.metaheuristic.as_ref()
    }

    /// The objective function.
    #[must_use]
    pub fn function(&self) -> &Function {
        &self.function
    }
}

/// A multi-algorithm optimization task over a partitioned population.
pub struct Hyperheuristic {
    space: SearchSpace,
    metaheuristics: Vec<Box<dyn Metaheuristic>>,
    function: Function,
}

impl Hyperheuristic {
    /// Bundle a built space with several algorithms and an objective.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizeError::SpaceNotBuilt`] for an unbuilt space and
    /// [`OptimizeError::NoMetaheuristics`] for an empty algorithm list.
    pub fn new(
        space: SearchSpace,
        metaheuristics: Vec<Box<dyn Metaheuristic>>,
        function: Function,
    ) -> Result<Self> {
        if !space.is_built() {
            return Err(OptimizeError::SpaceNotBuilt);
        }
        if metaheuristics.is_empty() {
            return Err(OptimizeError::NoMetaheuristics);
        }
        Ok(Self {
            space,
            metaheuristics,
            function,
        })
    }

    /// Run every algorithm over its partition, one after another.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`SearchSpace::run_many`].
    pub fn start(&mut self) -> Result<OptimizationResult> {
        let start = Instant::now();
        let mut result = self.space.run_many(&mut self.metaheuristics, &self.function)?;
        result.elapsed_ms = elapsed_ms(start);
        info!(
            algorithms = self.metaheuristics.len(),
            elapsed_ms = result.elapsed_ms,
            "hyper-heuristic task ended"
        );
        Ok(result)
    }

    /// The search space, including the final population.
    #[must_use]
    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    /// The wrapped algorithms, in partition order.
    #[must_use]
    pub fn metaheuristics(&self) -> &[Box<dyn Metaheuristic>] {
        &self.metaheuristics
    }

    /// The objective function.
    #[must_use]
    pub fn function(&self) -> &Function {
        &self.function
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
