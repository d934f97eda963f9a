//! Electromagnetic Field Optimization (EFO).
//!
//! The sorted population is split into a positive field (best agents), a
//! negative field (worst agents) and a neutral field in between. Each update
//! builds one new electromagnet variable by variable from a positive, a
//! negative and a neutral particle, occasionally resets one variable at
//! random, and lets it replace the worst agent if it is better.
//!
//! ```text
//! x_j = x_pos_j                                       if u < ps_ratio
//! x_j = x_neg_j + φ·F·(x_pos_j - x_neu_j) - F·(x_neg_j - x_neu_j)   otherwise
//! ```
//!
//! # References
//!
//! - Abedinpourshotorban et al. (2016): "Electromagnetic field optimization:
//!   A physics-inspired metaheuristic optimization algorithm"

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::decorator::{clip_all, decorate, indices, sort_by_fitness, Plain};
use crate::core::hyperparams::as_probability;
use crate::core::traits::{check_ready, evaluate_members};
use crate::core::{Agent, Function, Iteration, Metaheuristic};
use crate::error::{OptimizeError, Result};
use crate::math::stochastic::{entropy_rng, rng_from, uniform};

const NAME: &str = "EFO";

/// Golden ratio.
const PHI: f64 = 1.618_033_988_749_895;

/// Electromagnetic Field optimizer.
///
/// Hyperparameter names: `positive_field`, `negative_field`, `ps_ratio`,
/// `r_ratio`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectromagneticField {
    /// Share of the population in the positive field (default: 0.1)
    pub positive_field: f64,
    /// Share of the population in the negative field (default: 0.5)
    pub negative_field: f64,
    /// Probability of copying a positive particle's variable (default: 0.1)
    pub ps_ratio: f64,
    /// Probability of resetting one variable at random (default: 0.4)
    pub r_ratio: f64,
    /// Random seed
    #[serde(default)]
    seed: Option<u64>,

    #[serde(skip)]
    particles: Vec<Plain>,
    #[serde(skip)]
    ri: usize,
    #[serde(skip, default = "entropy_rng")]
    rng: StdRng,
}

impl Default for ElectromagneticField {
    fn default() -> Self {
        Self {
            positive_field: 0.1,
            negative_field: 0.5,
            ps_ratio: 0.1,
            r_ratio: 0.4,
            seed: None,
            particles: Vec::new(),
            ri: 0,
            rng: entropy_rng(),
        }
    }
}

impl ElectromagneticField {
    /// Set the positive and negative field shares.
    ///
    /// Unchecked here; [`Metaheuristic::decorate`] rejects shares outside
    /// `[0, 1]`.
    #[must_use]
    pub fn with_fields(mut self, positive_field: f64, negative_field: f64) -> Self {
        self.positive_field = positive_field;
        self.negative_field = negative_field;
        self
    }

    /// Set the selection and reset probabilities.
    ///
    /// Unchecked here; [`Metaheuristic::decorate`] rejects values outside
    /// `[0, 1]`.
    #[must_use]
    pub fn with_ratios(mut self, ps_ratio: f64, r_ratio: f64) -> Self {
        self.ps_ratio = ps_ratio;
        self.r_ratio = r_ratio;
        self
    }

    /// Set random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = rng_from(self.seed);
        self
    }

    /// Index of the next variable to reset at random.
    #[must_use]
    pub fn reset_index(&self) -> usize {
        self.ri
    }

    /// Draw (positive, negative, neutral) ranks for a population of `n`.
    fn field_indexes(&mut self, n: usize) -> (usize, usize, usize) {
        let n_f = n as f64;
        let last = n - 1;
        let positive = uniform(&mut self.rng, 0.0, n_f * self.positive_field) as usize;
        let negative = uniform(&mut self.rng, n_f * (1.0 - self.negative_field), n_f) as usize;
        let neutral = uniform(
            &mut self.rng,
            n_f * self.positive_field,
            n_f * (1.0 - self.negative_field),
        ) as usize;
        (positive.min(last), negative.min(last), neutral.min(last))
    }
}

impl Metaheuristic for ElectromagneticField {
    fn name(&self) -> &'static str {
        NAME
    }

    fn set_hyperparameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "positive_field" => self.positive_field = as_probability(name, value)?,
            "negative_field" => self.negative_field = as_probability(name, value)?,
            "ps_ratio" => self.ps_ratio = as_probability(name, value)?,
            "r_ratio" => self.r_ratio = as_probability(name, value)?,
            _ => return Err(OptimizeError::unknown_hyperparameter(NAME, name)),
        }
        Ok(())
    }

    fn decorate(&mut self, population: &[Agent], members: &[usize]) -> Result<()> {
        as_probability("positive_field", self.positive_field)?;
        as_probability("negative_field", self.negative_field)?;
        as_probability("ps_ratio", self.ps_ratio)?;
        as_probability("r_ratio", self.r_ratio)?;
        self.particles = decorate(NAME, &self.particles, population, members, |_| ())?;
        self.ri = 0;
        Ok(())
    }

    fn members(&self) -> Vec<usize> {
        indices(&self.particles)
    }

    fn evaluate(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
    ) -> Result<()> {
        evaluate_members(NAME, &self.particles, agents, best, function)
    }

    fn update(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
        _iteration: Iteration,
    ) -> Result<()> {
        check_ready(NAME, &self.particles, agents, best)?;
        sort_by_fitness(&mut self.particles, agents);

        let n = self.particles.len();
        let mut magnet = self.particles[0].agent(agents).clone();
        let force: f64 = self.rng.random();

        for j in 0..magnet.dimension() {
            let (pos, neg, neu) = self.field_indexes(n);
            let x_pos = self.particles[pos].agent(agents).position()[j];
            let x_neg = self.particles[neg].agent(agents).position()[j];
            let x_neu = self.particles[neu].agent(agents).position()[j];

            magnet.position_mut()[j] = if self.rng.random::<f64>() < self.ps_ratio {
                x_pos
            } else {
                x_neg + PHI * force * (x_pos - x_neu) - force * (x_neg - x_neu)
            };
        }
        magnet.clip();

        if self.rng.random::<f64>() < self.r_ratio {
            let ri = self.ri;
            let (lo, hi) = (magnet.lower_bound()[ri], magnet.upper_bound()[ri]);
            magnet.position_mut()[ri] = uniform(&mut self.rng, lo, hi);
            self.ri = (ri + 1) % magnet.dimension();
        }

        magnet.set_fitness(function.calculate(magnet.position())?);
        let worst = self.particles[n - 1].agent_mut(agents);
        if magnet.is_better_than(worst) {
            worst.clone_from(&magnet);
        }

        clip_all(&self.particles, agents);
        self.evaluate(agents, best, function)
    }
}
