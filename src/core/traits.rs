//! The metaheuristic plugin contract.
//!
//! Every algorithm goes through the same lifecycle:
//!
//! ```text
//! build (hyperparameters) -> decorate (bind agents) -> evaluate (seed best)
//!                                                   -> update x N iterations
//! ```
//!
//! Each `update` must finish by clipping its agents to their bounds,
//! re-evaluating them and refreshing the global best, so the best agent
//! never gets worse from one iteration to the next.

use crate::core::decorator::{ensure_decorated, Decorated};
use crate::core::{Agent, Function, Hyperparameters};
use crate::error::{OptimizeError, Result};

/// Position of the current update within the iteration budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iteration {
    /// Zero-based index of the current iteration.
    pub current: usize,
    /// Total number of iterations in the run.
    pub total: usize,
}

impl Iteration {
    /// Create an iteration marker.
    #[must_use]
    pub fn new(current: usize, total: usize) -> Self {
        Self { current, total }
    }

    /// Fraction of the budget already spent, in `[0, 1)`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.current as f64 / self.total as f64
        }
    }
}

/// A population-based search algorithm driven by a [`SearchSpace`].
///
/// Implementors own a list of decorated agent slots (indices into the
/// space's population) and any per-agent side state. The population slice
/// and the global best are lent to `evaluate`/`update` on every call.
///
/// [`SearchSpace`]: crate::core::SearchSpace
pub trait Metaheuristic {
    /// Short algorithm name, e.g. `"PSO"`.
    fn name(&self) -> &'static str;

    /// Assign one named hyperparameter.
    ///
    /// # Errors
    ///
    /// Unknown names and out-of-domain values are configuration errors.
    fn set_hyperparameter(&mut self, name: &str, value: f64) -> Result<()>;

    /// Assign every entry of `params`, stopping at the first invalid one.
    ///
    /// # Errors
    ///
    /// See [`Metaheuristic::set_hyperparameter`].
    fn apply_hyperparameters(&mut self, params: &Hyperparameters) -> Result<()> {
        for (name, value) in params.iter() {
            self.set_hyperparameter(name, value)?;
        }
        Ok(())
    }

    /// Build an instance from defaults plus optional overrides.
    ///
    /// # Errors
    ///
    /// See [`Metaheuristic::set_hyperparameter`].
    fn build(params: Option<&Hyperparameters>) -> Result<Self>
    where
        Self: Sized + Default,
    {
        let mut metaheuristic = Self::default();
        if let Some(params) = params {
            metaheuristic.apply_hyperparameters(params)?;
        }
        Ok(metaheuristic)
    }

    /// Build an instance from defaults plus `params`.
    ///
    /// # Errors
    ///
    /// See [`Metaheuristic::set_hyperparameter`].
    fn with_hyperparameters(params: &Hyperparameters) -> Result<Self>
    where
        Self: Sized + Default,
    {
        Self::build(Some(params))
    }

    /// Bind the agents at `members` (indices into `population`) to this
    /// algorithm and size any per-agent state. Runs exactly once.
    ///
    /// # Errors
    ///
    /// Empty member lists, out-of-range indices and a second call are errors.
    fn decorate(&mut self, population: &[Agent], members: &[usize]) -> Result<()>;

    /// Indices of the agents this algorithm owns, in its current order.
    fn members(&self) -> Vec<usize>;

    /// Recompute fitness for every owned agent and clone any improvement
    /// into `best`. Calling it twice without moving agents changes nothing.
    ///
    /// # Errors
    ///
    /// Propagates objective failures; fails if not decorated.
    fn evaluate(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
    ) -> Result<()>;

    /// Move owned agents, then clip, re-evaluate and refresh `best`.
    ///
    /// # Errors
    ///
    /// Propagates objective failures and dimension errors; fails if not
    /// decorated.
    fn update(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
        iteration: Iteration,
    ) -> Result<()>;
}

/// Refuse to update before decoration, against a population too short for
/// the decorated indices, or against a best agent of the wrong dimension.
pub(crate) fn check_ready<E>(
    algorithm: &'static str,
    decorated: &[Decorated<E>],
    agents: &[Agent],
    best: &Agent,
) -> Result<()> {
    ensure_decorated(algorithm, decorated, agents)?;
    let dimension = decorated[0].agent(agents).dimension();
    if best.dimension() != dimension {
        return Err(OptimizeError::dimension_mismatch(
            "best agent",
            dimension,
            best.dimension(),
        ));
    }
    Ok(())
}

/// Standard evaluate step shared by algorithms without a custom rule.
pub(crate) fn evaluate_members<E>(
    algorithm: &'static str,
    decorated: &[Decorated<E>],
    agents: &mut [Agent],
    best: &mut Agent,
    function: &Function,
) -> Result<()> {
    ensure_decorated(algorithm, decorated, agents)?;
    for member in decorated {
        let agent = member.agent_mut(agents);
        let fitness = function.calculate(agent.position())?;
        agent.set_fitness(fitness);
        if agent.is_better_than(best) {
            best.clone_from(agent);
        }
    }
    Ok(())
}
