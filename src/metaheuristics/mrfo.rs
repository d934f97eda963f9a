//! Manta Ray Foraging Optimization (MRFO).
//!
//! Each manta ray either chains behind the ray in front of it or spirals
//! (cyclone foraging) around a reference point: a random point early in the
//! run, the global best later on. A somersault around the best then follows
//! for every ray.
//!
//! # References
//!
//! - Zhao, Zhang & Wang (2020): "Manta ray foraging optimization: An effective
//!   bio-inspired optimizer for engineering applications"

use std::f64::consts::PI;

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::decorator::{clip_all, decorate, indices, Plain};
use crate::core::hyperparams::as_finite;
use crate::core::traits::{check_ready, evaluate_members};
use crate::core::{Agent, Function, Iteration, Metaheuristic};
use crate::error::{OptimizeError, Result};
use crate::math::stochastic::{entropy_rng, rng_from, uniform};

const NAME: &str = "MRFO";

/// Manta Ray Foraging optimizer.
///
/// Hyperparameter names: `S` (somersault factor).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MantaRay {
    /// Somersault foraging factor (default: 2.0)
    pub somersault: f64,
    /// Random seed
    #[serde(default)]
    seed: Option<u64>,

    #[serde(skip)]
    rays: Vec<Plain>,
    #[serde(skip, default = "entropy_rng")]
    rng: StdRng,
}

impl Default for MantaRay {
    fn default() -> Self {
        Self {
            somersault: 2.0,
            seed: None,
            rays: Vec::new(),
            rng: entropy_rng(),
        }
    }
}

impl MantaRay {
    /// Set the somersault factor.
    #[must_use]
    pub fn with_somersault(mut self, somersault: f64) -> Self {
        self.somersault = somersault;
        self
    }

    /// Set random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = rng_from(self.seed);
        self
    }

    /// Cyclone foraging for ray `i`; `previous` is the ray in front of it,
    /// or `None` for the leader.
    fn cyclone(
        &mut self,
        agent: &Agent,
        previous: Option<&[f64]>,
        best: &Agent,
        iteration: Iteration,
    ) -> Vec<f64> {
        let total = iteration.total.max(1) as f64;
        let r1: f64 = self.rng.random();
        let beta = 2.0
            * (r1 * (total - iteration.current as f64 + 1.0) / total).exp()
            * (2.0 * PI * r1).sin();
        let r2: f64 = self.rng.random();
        let r3: f64 = self.rng.random();

        let reference: Vec<f64> = if iteration.progress() < r2 {
            agent
                .lower_bound()
                .iter()
                .zip(agent.upper_bound())
                .map(|(&lo, &hi)| uniform(&mut self.rng, lo, hi))
                .collect()
        } else {
            best.position().to_vec()
        };

        let x = agent.position();
        let lead = previous.unwrap_or(reference.as_slice());
        (0..x.len())
            .map(|j| reference[j] + r3 * (lead[j] - x[j]) + beta * (reference[j] - x[j]))
            .collect()
    }

    /// Chain foraging for ray `i`.
    fn chain(&mut self, agent: &Agent, previous: Option<&[f64]>, best: &Agent) -> Vec<f64> {
        let r1: f64 = self.rng.random();
        let alpha = 2.0 * r1 * r1.max(f64::MIN_POSITIVE).ln().abs().sqrt();
        let r2: f64 = self.rng.random();

        let x = agent.position();
        let b = best.position();
        let lead = previous.unwrap_or(b);
        (0..x.len())
            .map(|j| x[j] + r2 * (lead[j] - x[j]) + alpha * (b[j] - x[j]))
            .collect()
    }
}

impl Metaheuristic for MantaRay {
    fn name(&self) -> &'static str {
        NAME
    }

    fn set_hyperparameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "S" | "somersault" => self.somersault = as_finite(name, value)?,
            _ => return Err(OptimizeError::unknown_hyperparameter(NAME, name)),
        }
        Ok(())
    }

    fn decorate(&mut self, population: &[Agent], members: &[usize]) -> Result<()> {
        self.rays = decorate(NAME, &self.rays, population, members, |_| ())?;
        Ok(())
    }

    fn members(&self) -> Vec<usize> {
        indices(&self.rays)
    }

    fn evaluate(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
    ) -> Result<()> {
        evaluate_members(NAME, &self.rays, agents, best, function)
    }

    fn update(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
        iteration: Iteration,
    ) -> Result<()> {
        check_ready(NAME, &self.rays, agents, best)?;

        for i in 0..self.rays.len() {
            let previous = (i > 0).then(|| self.rays[i - 1].agent(agents).position().to_vec());
            let current = self.rays[i].agent(agents).clone();

            let position = if self.rng.random::<f64>() < 0.5 {
                self.cyclone(&current, previous.as_deref(), best, iteration)
            } else {
                self.chain(&current, previous.as_deref(), best)
            };

            let agent = self.rays[i].agent_mut(agents);
            agent.set_position(&position)?;
            agent.clip();
            agent.set_fitness(function.calculate(agent.position())?);
            if agent.is_better_than(best) {
                best.clone_from(agent);
            }
        }

        for ray in &self.rays {
            let r1: f64 = self.rng.random();
            let r2: f64 = self.rng.random();
            let agent = ray.agent_mut(agents);
            for (x, &b) in agent.position_mut().iter_mut().zip(best.position()) {
                *x += self.somersault * (r1 * b - r2 * *x);
            }
        }

        clip_all(&self.rays, agents);
        self.evaluate(agents, best, function)
    }
}
