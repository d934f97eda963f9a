//! Artificial Bee Colony (ABC).
//!
//! Each agent is a food source. Every update runs three phases:
//!
//! ```text
//! 1. Employed bees: perturb every source towards/away from a random neighbor
//! 2. Onlooker bees: revisit sources with probability f_i / Σf + 0.1
//! 3. Scout bee:     re-explore the most exhausted source once its trial
//!                   counter exceeds `n_trials`
//! ```
//!
//! A perturbed source replaces the original only if it is strictly better.
//!
//! # References
//!
//! - Karaboga & Basturk (2007): "A powerful and efficient algorithm for
//!   numerical function optimization: artificial bee colony (ABC) algorithm"

use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::decorator::{clip_all, decorate, indices, Plain};
use crate::core::hyperparams::as_count;
use crate::core::traits::{check_ready, evaluate_members};
use crate::core::{Agent, Function, Iteration, Metaheuristic};
use crate::error::{OptimizeError, Result};
use crate::math::stochastic::{entropy_rng, integer, rng_from, uniform};

const NAME: &str = "ABC";

/// Artificial Bee Colony optimizer.
///
/// Hyperparameter names: `n_trials`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeeColony {
    /// Trials before a source is abandoned (default: 10)
    pub n_trials: usize,
    /// Random seed
    #[serde(default)]
    seed: Option<u64>,

    #[serde(skip)]
    sources: Vec<Plain>,
    #[serde(skip)]
    trials: Vec<usize>,
    #[serde(skip, default = "entropy_rng")]
    rng: StdRng,
}

impl Default for BeeColony {
    fn default() -> Self {
        Self {
            n_trials: 10,
            seed: None,
            sources: Vec::new(),
            trials: Vec::new(),
            rng: entropy_rng(),
        }
    }
}

impl BeeColony {
    /// Set the abandonment limit.
    #[must_use]
    pub fn with_trials(mut self, n_trials: usize) -> Self {
        self.n_trials = n_trials;
        self
    }

    /// Set random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = rng_from(self.seed);
        self
    }

    /// Per-source trial counters.
    #[must_use]
    pub fn trials(&self) -> &[usize] {
        &self.trials
    }

    /// Move source `i` relative to source `neighbor`; keep it if better.
    fn evaluate_location(
        &mut self,
        i: usize,
        neighbor: usize,
        agents: &mut [Agent],
        function: &Function,
    ) -> Result<()> {
        let r1 = uniform(&mut self.rng, -1.0, 1.0);
        let index = self.sources[i].index();
        let mut candidate = agents[index].clone();
        let other = self.sources[neighbor].agent(agents).position();

        for (x, &n) in candidate.position_mut().iter_mut().zip(other) {
            *x += (*x - n) * r1;
        }
        candidate.clip();
        candidate.set_fitness(function.calculate(candidate.position())?);

        if candidate.is_better_than(&agents[index]) {
            agents[index].clone_from(&candidate);
            self.trials[i] = 0;
        } else {
            self.trials[i] += 1;
        }
        Ok(())
    }

    fn send_employee(&mut self, agents: &mut [Agent], function: &Function) -> Result<()> {
        let n = self.sources.len();
        for i in 0..n {
            let neighbor = integer(&mut self.rng, 0, n - 1);
            self.evaluate_location(i, neighbor, agents, function)?;
        }
        Ok(())
    }

    fn send_onlooker(&mut self, agents: &mut [Agent], function: &Function) -> Result<()> {
        let n = self.sources.len();
        let total: f64 = self.sources.iter().map(|s| s.agent(agents).fitness()).sum();

        let mut visited = 0;
        while visited < n {
            for i in 0..n {
                let share = self.sources[i].agent(agents).fitness() / (total + f64::EPSILON);
                let probability = if share.is_finite() { share.max(0.0) + 0.1 } else { 0.1 };
                let r1: f64 = self.rng.random();

                if r1 < probability {
                    visited += 1;
                    let neighbor = integer(&mut self.rng, 0, n - 1);
                    self.evaluate_location(i, neighbor, agents, function)?;
                }
            }
        }
        Ok(())
    }

    fn send_scout(&mut self, agents: &mut [Agent], function: &Function) -> Result<()> {
        let Some((i, &trial)) = self
            .trials
            .iter()
            .enumerate()
            .max_by_key(|&(i, &trial)| (trial, i))
        else {
            return Ok(());
        };
        if trial <= self.n_trials {
            return Ok(());
        }

        trace!(source = i, trial, "scout bee abandons source");
        self.trials[i] = 0;
        let index = self.sources[i].index();
        let mut candidate = agents[index].clone();
        for x in candidate.position_mut() {
            *x += uniform(&mut self.rng, -1.0, 1.0);
        }
        candidate.clip();
        candidate.set_fitness(function.calculate(candidate.position())?);

        if candidate.is_better_than(&agents[index]) {
            agents[index].clone_from(&candidate);
        }
        Ok(())
    }
}

impl Metaheuristic for BeeColony {
    fn name(&self) -> &'static str {
        NAME
    }

    fn set_hyperparameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "n_trials" => self.n_trials = as_count(name, value, 1)?,
            _ => return Err(OptimizeError::unknown_hyperparameter(NAME, name)),
        }
        Ok(())
    }

    fn decorate(&mut self, population: &[Agent], members: &[usize]) -> Result<()> {
        self.sources = decorate(NAME, &self.sources, population, members, |_| ())?;
        self.trials = vec![0; self.sources.len()];
        Ok(())
    }

    fn members(&self) -> Vec<usize> {
        indices(&self.sources)
    }

    fn evaluate(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
    ) -> Result<()> {
        evaluate_members(NAME, &self.sources, agents, best, function)
    }

    fn update(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
        _iteration: Iteration,
    ) -> Result<()> {
        check_ready(NAME, &self.sources, agents, best)?;

        self.send_employee(agents, function)?;
        self.send_onlooker(agents, function)?;
        self.send_scout(agents, function)?;

        clip_all(&self.sources, agents);
        self.evaluate(agents, best, function)
    }
}
