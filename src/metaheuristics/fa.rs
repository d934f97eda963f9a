//! Firefly Algorithm (FA).
//!
//! Every firefly moves towards each brighter (lower fitness) firefly with an
//! attractiveness that decays with distance, plus a small random step whose
//! size is annealed over the run.
//!
//! ```text
//! α ← α·(1 - δ),   δ = 1 - (1e-3 / 0.9)^(1/T)
//! β = β₀·exp(-γ·r_ik)
//! x_i = x_i + β·(x_k - x_i) + α·(u - 0.5)
//! ```
//!
//! # References
//!
//! - Yang (2010): "Firefly Algorithm, Stochastic Test Functions and Design
//!   Optimisation"

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::decorator::{clip_all, decorate, indices, Plain};
use crate::core::hyperparams::as_finite;
use crate::core::traits::{check_ready, evaluate_members};
use crate::core::{Agent, Function, Iteration, Metaheuristic};
use crate::error::{OptimizeError, Result};
use crate::math::distance::euclidean;
use crate::math::stochastic::{entropy_rng, rng_from};

const NAME: &str = "FA";

/// Firefly optimizer.
///
/// Hyperparameter names: `alpha`, `beta`, `gamma`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Firefly {
    /// Initial randomization step (default: 0.5)
    pub alpha: f64,
    /// Attractiveness at zero distance (default: 0.2)
    pub beta: f64,
    /// Light absorption coefficient (default: 1.0)
    pub gamma: f64,
    /// Random seed
    #[serde(default)]
    seed: Option<u64>,

    #[serde(skip)]
    fireflies: Vec<Plain>,
    #[serde(skip)]
    current_alpha: f64,
    #[serde(skip, default = "entropy_rng")]
    rng: StdRng,
}

impl Default for Firefly {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            beta: 0.2,
            gamma: 1.0,
            seed: None,
            fireflies: Vec::new(),
            current_alpha: 0.5,
            rng: entropy_rng(),
        }
    }
}

impl Firefly {
    /// Set randomization step.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set attractiveness and absorption.
    #[must_use]
    pub fn with_attraction(mut self, beta: f64, gamma: f64) -> Self {
        self.beta = beta;
        self.gamma = gamma;
        self
    }

    /// Set random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = rng_from(self.seed);
        self
    }

    /// Randomization step after annealing.
    #[must_use]
    pub fn current_alpha(&self) -> f64 {
        self.current_alpha
    }
}

impl Metaheuristic for Firefly {
    fn name(&self) -> &'static str {
        NAME
    }

    fn set_hyperparameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "alpha" => self.alpha = as_finite(name, value)?,
            "beta" => self.beta = as_finite(name, value)?,
            "gamma" => self.gamma = as_finite(name, value)?,
            _ => return Err(OptimizeError::unknown_hyperparameter(NAME, name)),
        }
        Ok(())
    }

    fn decorate(&mut self, population: &[Agent], members: &[usize]) -> Result<()> {
        self.fireflies = decorate(NAME, &self.fireflies, population, members, |_| ())?;
        self.current_alpha = self.alpha;
        Ok(())
    }

    fn members(&self) -> Vec<usize> {
        indices(&self.fireflies)
    }

    fn evaluate(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
    ) -> Result<()> {
        evaluate_members(NAME, &self.fireflies, agents, best, function)
    }

    fn update(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
        iteration: Iteration,
    ) -> Result<()> {
        check_ready(NAME, &self.fireflies, agents, best)?;

        let delta = 1.0 - (1e-3 / 0.9_f64).powf(1.0 / iteration.total.max(1) as f64);
        self.current_alpha *= 1.0 - delta;

        // Brightness is compared against the positions at the start of the round.
        let snapshot: Vec<(Vec<f64>, f64)> = self
            .fireflies
            .iter()
            .map(|f| {
                let agent = f.agent(agents);
                (agent.position().to_vec(), agent.fitness())
            })
            .collect();

        for firefly in &self.fireflies {
            let agent = firefly.agent_mut(agents);
            for (other, other_fitness) in &snapshot {
                if agent.fitness() <= *other_fitness {
                    continue;
                }
                let distance = euclidean(agent.position(), other)?;
                let beta = self.beta * (-self.gamma * distance).exp();
                let r1: f64 = self.rng.random();

                for (x, &o) in agent.position_mut().iter_mut().zip(other) {
                    *x += beta * (o - *x) + self.current_alpha * (r1 - 0.5);
                }
            }
        }

        clip_all(&self.fireflies, agents);
        self.evaluate(agents, best, function)
    }
}
