//! Black Hole (BH).
//!
//! The best agent is the black hole; every other agent is a star pulled
//! towards it. A star that beats the black hole swaps places with it. Stars
//! that cross the event horizon are swallowed and re-born uniformly at
//! random inside the bounds.
//!
//! ```text
//! x = x + r·(x_bh - x)                 r ~ U[0, 1)
//! R = f_bh / Σ f_i                     (event horizon radius)
//! if ‖x_bh - x‖ < R: x ~ U[lower, upper]
//! ```
//!
//! # References
//!
//! - Hatamlou (2013): "Black hole: A new heuristic optimization approach for
//!   data clustering"

use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::decorator::{clip_all, decorate, indices, Plain};
use crate::core::traits::{check_ready, evaluate_members};
use crate::core::{Agent, Function, Iteration, Metaheuristic};
use crate::error::{OptimizeError, Result};
use crate::math::distance::euclidean;
use crate::math::vector::subtract;
use crate::math::stochastic::{entropy_rng, rng_from, uniform};

const NAME: &str = "BH";

/// Black Hole optimizer. Has no hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlackHole {
    /// Random seed
    #[serde(default)]
    seed: Option<u64>,

    #[serde(skip)]
    stars: Vec<Plain>,
    #[serde(skip, default = "entropy_rng")]
    rng: StdRng,
}

impl Default for BlackHole {
    fn default() -> Self {
        Self {
            seed: None,
            stars: Vec::new(),
            rng: entropy_rng(),
        }
    }
}

impl BlackHole {
    /// Set random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = rng_from(self.seed);
        self
    }

    /// Move every star and return the summed fitness of the stars.
    fn update_position(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
    ) -> Result<f64> {
        let mut cost = 0.0;
        for star in &self.stars {
            let agent = star.agent_mut(agents);
            let r1: f64 = self.rng.random();
            let pull = subtract(best.position(), agent.position())?;
            for (x, d) in agent.position_mut().iter_mut().zip(pull) {
                *x += r1 * d;
            }
            agent.clip();
            agent.set_fitness(function.calculate(agent.position())?);

            if agent.is_better_than(best) {
                agent.exchange(best);
            }
            cost += agent.fitness();
        }
        Ok(cost)
    }

    fn event_horizon(&mut self, agents: &mut [Agent], best: &Agent, cost: f64) -> Result<()> {
        let radius = best.fitness() / cost.max(f64::EPSILON);

        for star in &self.stars {
            let agent = star.agent_mut(agents);
            if euclidean(best.position(), agent.position())? < radius {
                trace!(star = star.index(), radius, "star crossed the event horizon");
                let bounds: Vec<(f64, f64)> = agent
                    .lower_bound()
                    .iter()
                    .copied()
                    .zip(agent.upper_bound().iter().copied())
                    .collect();
                for (x, (lo, hi)) in agent.position_mut().iter_mut().zip(bounds) {
                    *x = uniform(&mut self.rng, lo, hi);
                }
            }
        }
        Ok(())
    }
}

impl Metaheuristic for BlackHole {
    fn name(&self) -> &'static str {
        NAME
    }

    fn set_hyperparameter(&mut self, name: &str, _value: f64) -> Result<()> {
        Err(OptimizeError::unknown_hyperparameter(NAME, name))
    }

    fn decorate(&mut self, population: &[Agent], members: &[usize]) -> Result<()> {
        self.stars = decorate(NAME, &self.stars, population, members, |_| ())?;
        Ok(())
    }

    fn members(&self) -> Vec<usize> {
        indices(&self.stars)
    }

    fn evaluate(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
    ) -> Result<()> {
        evaluate_members(NAME, &self.stars, agents, best, function)
    }

    fn update(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
        _iteration: Iteration,
    ) -> Result<()> {
        check_ready(NAME, &self.stars, agents, best)?;

        let cost = self.update_position(agents, best, function)?;
        self.event_horizon(agents, best, cost)?;

        clip_all(&self.stars, agents);
        self.evaluate(agents, best, function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Hyperparameters, SearchSpace};

    #[test]
    fn test_bh_has_no_hyperparameters() {
        let params = Hyperparameters::new().with("radius", 1.0);
        assert!(matches!(
            BlackHole::with_hyperparameters(&params),
            Err(OptimizeError::UnknownHyperparameter { algorithm: "BH", .. })
        ));
        assert!(BlackHole::build(None).is_ok());
    }

    #[test]
    fn test_bh_swap_keeps_best_no_worse() {
        let mut space = SearchSpace::new(8, 2, 25)
            .with_seed(4)
            .continuous(-5.0, 5.0)
            .expect("space");
        let function = Function::new("sphere", |x: &[f64]| x.iter().map(|v| v * v).sum());
        let mut bh = BlackHole::default().with_seed(4);
        let result = space.run(&mut bh, &function).expect("run");
        assert!(result.is_monotonic());
        assert!(space.agents().iter().all(Agent::is_within_bounds));
    }

    #[test]
    fn test_bh_star_drifts_towards_best() {
        let function = Function::new("sphere", |x: &[f64]| x.iter().map(|v| v * v).sum());
        let mut star = Agent::with_bounds(vec![-10.0; 2], vec![10.0; 2]).expect("bounds");
        star.set_position(&[4.0, -4.0]).expect("position");
        let mut agents = vec![star];
        let mut best = Agent::with_bounds(vec![-10.0; 2], vec![10.0; 2]).expect("bounds");
        best.set_position(&[0.0, 0.0]).expect("position");
        best.set_fitness(0.0);

        let mut bh = BlackHole::default().with_seed(8);
        bh.decorate(&agents, &[0]).expect("decorate");
        bh.update_position(&mut agents, &mut best, &function).expect("move");

        let moved = agents[0].position();
        assert!((0.0..=4.0).contains(&moved[0]), "star left the segment: {moved:?}");
        assert!((moved[0] + moved[1]).abs() < 1e-12, "star left the line to best");
        assert_eq!(best.position(), &[0.0, 0.0]);
    }

    #[test]
    fn test_bh_rejects_best_of_other_dimension() {
        let function = Function::new("sphere", |x: &[f64]| x.iter().map(|v| v * v).sum());
        let mut agents = vec![Agent::new(2)];
        let mut best = Agent::new(3);
        let mut bh = BlackHole::default().with_seed(8);
        bh.decorate(&agents, &[0]).expect("decorate");

        let err = bh.update_position(&mut agents, &mut best, &function).unwrap_err();
        assert!(matches!(err, OptimizeError::DimensionMismatch { .. }));
    }
}
