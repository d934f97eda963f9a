//! Sine Cosine Algorithm (SCA).
//!
//! Agents oscillate around the global best following a sine or cosine
//! wave whose amplitude shrinks linearly over the run.
//!
//! ```text
//! r1 = a - t·a/T
//! x  = x + r1·sin(r2)·|r3·x* - x|     if r4 < 0.5
//! x  = x + r1·cos(r2)·|r3·x* - x|     otherwise
//! ```
//!
//! `r2`, `r3` and `r4` are drawn once per iteration and shared by all agents.
//!
//! # References
//!
//! - Mirjalili (2016): "SCA: A Sine Cosine Algorithm for solving optimization
//!   problems"

use std::f64::consts::PI;

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::decorator::{clip_all, decorate, indices, Plain};
use crate::core::hyperparams::as_finite;
use crate::core::traits::{check_ready, evaluate_members};
use crate::core::{Agent, Function, Iteration, Metaheuristic};
use crate::error::{OptimizeError, Result};
use crate::math::stochastic::{entropy_rng, rng_from, uniform};

const NAME: &str = "SCA";

/// Sine Cosine optimizer.
///
/// Hyperparameter names: `r_min`, `r_max`, `a`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SineCosine {
    /// Lower end of the `r3` weight range (default: 0.0)
    pub r_min: f64,
    /// Upper end of the `r3` weight range (default: 2.0)
    pub r_max: f64,
    /// Initial amplitude (default: 3.0)
    pub a: f64,
    /// Random seed
    #[serde(default)]
    seed: Option<u64>,

    #[serde(skip)]
    agents: Vec<Plain>,
    #[serde(skip, default = "entropy_rng")]
    rng: StdRng,
}

impl Default for SineCosine {
    fn default() -> Self {
        Self {
            r_min: 0.0,
            r_max: 2.0,
            a: 3.0,
            seed: None,
            agents: Vec::new(),
            rng: entropy_rng(),
        }
    }
}

impl SineCosine {
    /// Set the `r3` weight range.
    #[must_use]
    pub fn with_range(mut self, r_min: f64, r_max: f64) -> Self {
        self.r_min = r_min;
        self.r_max = r_max;
        self
    }

    /// Set the initial amplitude.
    #[must_use]
    pub fn with_amplitude(mut self, a: f64) -> Self {
        self.a = a;
        self
    }

    /// Set random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = rng_from(self.seed);
        self
    }
}

impl Metaheuristic for SineCosine {
    fn name(&self) -> &'static str {
        NAME
    }

    fn set_hyperparameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "r_min" => self.r_min = as_finite(name, value)?,
            "r_max" => self.r_max = as_finite(name, value)?,
            "a" => self.a = as_finite(name, value)?,
            _ => return Err(OptimizeError::unknown_hyperparameter(NAME, name)),
        }
        Ok(())
    }

    fn decorate(&mut self, population: &[Agent], members: &[usize]) -> Result<()> {
        self.agents = decorate(NAME, &self.agents, population, members, |_| ())?;
        Ok(())
    }

    fn members(&self) -> Vec<usize> {
        indices(&self.agents)
    }

    fn evaluate(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
    ) -> Result<()> {
        evaluate_members(NAME, &self.agents, agents, best, function)
    }

    fn update(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
        iteration: Iteration,
    ) -> Result<()> {
        check_ready(NAME, &self.agents, agents, best)?;

        let r1 = self.a - iteration.progress() * self.a;
        let r2 = uniform(&mut self.rng, 0.0, 2.0 * PI);
        let r3 = uniform(&mut self.rng, self.r_min, self.r_max);
        let wave = if self.rng.random::<f64>() < 0.5 {
            r2.sin()
        } else {
            r2.cos()
        };

        for member in &self.agents {
            let agent = member.agent_mut(agents);
            for (x, &b) in agent.position_mut().iter_mut().zip(best.position()) {
                *x += r1 * wave * (r3 * b - *x).abs();
            }
        }

        clip_all(&self.agents, agents);
        self.evaluate(agents, best, function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Hyperparameters, SearchSpace};

    #[test]
    fn test_sca_defaults() {
        let sca = SineCosine::default();
        assert_eq!((sca.r_min, sca.r_max, sca.a), (0.0, 2.0, 3.0));
    }

    #[test]
    fn test_sca_hyperparameters() {
        let params: Hyperparameters = [("a", 2.0), ("r_max", 1.0)].into_iter().collect();
        let sca = SineCosine::with_hyperparameters(&params).expect("valid");
        assert_eq!((sca.a, sca.r_max), (2.0, 1.0));
    }

    #[test]
    fn test_sca_stays_in_bounds() {
        let mut space = SearchSpace::new(10, 4, 30)
            .with_seed(21)
            .continuous(-1.0, 1.0)
            .expect("space");
        let function = Function::new("sum", |x: &[f64]| x.iter().sum());
        let mut sca = SineCosine::default().with_seed(21);
        let result = space.run(&mut sca, &function).expect("run");
        assert!(space.agents().iter().all(Agent::is_within_bounds));
        assert!(result.is_monotonic());
    }
}
