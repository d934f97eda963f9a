//! Bat Algorithm (BA).
//!
//! Echolocation-inspired search: each bat flies with a frequency-tuned
//! velocity towards the global best and, with a probability governed by its
//! pulse rate, performs a small random walk around the best solution.
//! Successful bats get quieter and pulse faster.
//!
//! # Algorithm
//!
//! ```text
//! f = f_min + (f_max - f_min)·β          β ~ U[0, 1)
//! v = v + (x* - x)·f
//! x = x + v
//! if p > pulse_rate: x = x* + 0.001·ε·mean(loudness)
//! if p < loudness and f(x) < f(x*): accept, raise pulse rate, lower loudness
//! ```
//!
//! # References
//!
//! - Yang (2010): "A New Metaheuristic Bat-Inspired Algorithm"

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::decorator::{clip_all, decorate, indices};
use crate::core::hyperparams::{as_finite, as_probability};
use crate::core::traits::{check_ready, evaluate_members};
use crate::core::{Agent, Bat, Decorated, Function, Iteration, Metaheuristic};
use crate::error::{OptimizeError, Result};
use crate::math::stochastic::{entropy_rng, gaussian, integer, rng_from, uniform};

const NAME: &str = "BA";

/// Loudness decay and pulse-rate growth constant.
const ALPHA: f64 = 0.9;

/// Bat Algorithm optimizer.
///
/// Hyperparameter names: `f_min`, `f_max`, `A` (loudness), `r` (pulse rate).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatAlgorithm {
    /// Minimum frequency (default: 0.0)
    pub f_min: f64,
    /// Maximum frequency (default: 2.0)
    pub f_max: f64,
    /// Initial loudness ceiling (default: 0.5)
    pub loudness: f64,
    /// Initial pulse rate ceiling (default: 0.5)
    pub pulse_rate: f64,
    /// Random seed
    #[serde(default)]
    seed: Option<u64>,

    #[serde(skip)]
    bats: Vec<Decorated<Bat>>,
    #[serde(skip)]
    frequencies: Vec<f64>,
    #[serde(skip)]
    loudnesses: Vec<f64>,
    #[serde(skip)]
    pulse_rates: Vec<f64>,
    #[serde(skip, default = "entropy_rng")]
    rng: StdRng,
}

impl Default for BatAlgorithm {
    fn default() -> Self {
        Self {
            f_min: 0.0,
            f_max: 2.0,
            loudness: 0.5,
            pulse_rate: 0.5,
            seed: None,
            bats: Vec::new(),
            frequencies: Vec::new(),
            loudnesses: Vec::new(),
            pulse_rates: Vec::new(),
            rng: entropy_rng(),
        }
    }
}

impl BatAlgorithm {
    /// Set the frequency range.
    ///
    /// Unchecked here; [`Metaheuristic::decorate`] rejects non-finite
    /// bounds.
    #[must_use]
    pub fn with_frequency(mut self, f_min: f64, f_max: f64) -> Self {
        self.f_min = f_min;
        self.f_max = f_max;
        self
    }

    /// Set the loudness ceiling.
    ///
    /// Unchecked here; [`Metaheuristic::decorate`] rejects values outside
    /// `[0, 1]`.
    #[must_use]
    pub fn with_loudness(mut self, loudness: f64) -> Self {
        self.loudness = loudness;
        self
    }

    /// Set the pulse-rate ceiling.
    ///
    /// Unchecked here; [`Metaheuristic::decorate`] rejects values outside
    /// `[0, 1]`.
    #[must_use]
    pub fn with_pulse_rate(mut self, pulse_rate: f64) -> Self {
        self.pulse_rate = pulse_rate;
        self
    }

    /// Set random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = rng_from(self.seed);
        self
    }

    /// Current per-bat loudness.
    #[must_use]
    pub fn loudnesses(&self) -> &[f64] {
        &self.loudnesses
    }

    /// Current per-bat pulse rate.
    #[must_use]
    pub fn pulse_rates(&self) -> &[f64] {
        &self.pulse_rates
    }
}

impl Metaheuristic for BatAlgorithm {
    fn name(&self) -> &'static str {
        NAME
    }

    fn set_hyperparameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "f_min" => self.f_min = as_finite(name, value)?,
            "f_max" => self.f_max = as_finite(name, value)?,
            "A" | "loudness" => self.loudness = as_probability(name, value)?,
            "r" | "pulse_rate" => self.pulse_rate = as_probability(name, value)?,
            _ => return Err(OptimizeError::unknown_hyperparameter(NAME, name)),
        }
        Ok(())
    }

    fn decorate(&mut self, population: &[Agent], members: &[usize]) -> Result<()> {
        as_finite("f_min", self.f_min)?;
        as_finite("f_max", self.f_max)?;
        as_probability("A", self.loudness)?;
        as_probability("r", self.pulse_rate)?;
        self.bats = decorate(NAME, &self.bats, population, members, Bat::new)?;

        let n = self.bats.len();
        self.frequencies = (0..n)
            .map(|_| uniform(&mut self.rng, self.f_min, self.f_max))
            .collect();
        self.loudnesses = (0..n)
            .map(|_| uniform(&mut self.rng, 0.0, self.loudness))
            .collect();
        self.pulse_rates = (0..n)
            .map(|_| uniform(&mut self.rng, 0.0, self.pulse_rate))
            .collect();
        Ok(())
    }

    fn members(&self) -> Vec<usize> {
        indices(&self.bats)
    }

    fn evaluate(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
    ) -> Result<()> {
        evaluate_members(NAME, &self.bats, agents, best, function)
    }

    fn update(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
        iteration: Iteration,
    ) -> Result<()> {
        check_ready(NAME, &self.bats, agents, best)?;

        for i in 0..self.bats.len() {
            let beta: f64 = self.rng.random();
            self.frequencies[i] = self.f_min + (self.f_max - self.f_min) * beta;
            let frequency = self.frequencies[i];

            let p = integer(&mut self.rng, 0, 1) as f64;
            let epsilon = gaussian(&mut self.rng, 0.0, 1.0);
            let mean_loudness = self.loudnesses.iter().sum::<f64>() / self.loudnesses.len() as f64;

            let (agent, bat) = self.bats[i].split_mut(agents);
            for (j, x) in agent.position_mut().iter_mut().enumerate() {
                bat.velocity[j] += (best.position()[j] - *x) * frequency;
                *x += bat.velocity[j];
            }

            if p > self.pulse_rates[i] {
                for (x, &b) in agent.position_mut().iter_mut().zip(best.position()) {
                    *x = b + 0.001 * epsilon * mean_loudness;
                }
            }

            agent.clip();
            agent.set_fitness(function.calculate(agent.position())?);

            if p < self.loudnesses[i] && agent.is_better_than(best) {
                best.clone_from(agent);
                self.pulse_rates[i] =
                    self.pulse_rate * (1.0 - (-ALPHA * iteration.current as f64).exp());
                self.loudnesses[i] *= ALPHA;
            }
        }

        clip_all(&self.bats, agents);
        self.evaluate(agents, best, function)
    }
}
