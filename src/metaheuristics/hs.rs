//! Harmony Search (HS) optimizer.
//!
//! A music-inspired metaheuristic based on musician improvisation. The
//! owned agents form the harmony memory.
//!
//! # Algorithm
//!
//! ```text
//! 1. Pick a random harmony from memory
//! 2. Improvise:
//!    - with probability HMCR keep it, pitch-adjusting it by r·bw
//!      with probability PAR
//!    - otherwise draw a fresh random harmony
//! 3. Replace the worst harmony if the new one is better
//! ```
//!
//! # References
//!
//! - Geem et al. (2001): "A New Heuristic Optimization Algorithm: Harmony Search"

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::decorator::{clip_all, decorate, indices, sort_by_fitness, Plain};
use crate::core::hyperparams::{as_finite, as_probability};
use crate::core::traits::{check_ready, evaluate_members};
use crate::core::{Agent, Function, Iteration, Metaheuristic};
use crate::error::{OptimizeError, Result};
use crate::math::stochastic::{entropy_rng, integer, rng_from, uniform};

const NAME: &str = "HS";

/// Harmony Search optimizer.
///
/// Hyperparameter names: `hmcr`, `par`, `bw`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarmonySearch {
    /// Harmony memory considering rate (default: 0.7)
    pub hmcr: f64,
    /// Pitch adjusting rate (default: 0.7)
    pub par: f64,
    /// Bandwidth for pitch adjustment (default: 1.0)
    pub bandwidth: f64,
    /// Random seed
    #[serde(default)]
    seed: Option<u64>,

    #[serde(skip)]
    memory: Vec<Plain>,
    #[serde(skip, default = "entropy_rng")]
    rng: StdRng,
}

impl Default for HarmonySearch {
    fn default() -> Self {
        Self {
            hmcr: 0.7,
            par: 0.7,
            bandwidth: 1.0,
            seed: None,
            memory: Vec::new(),
            rng: entropy_rng(),
        }
    }
}

impl HarmonySearch {
    /// Set HMCR.
    #[must_use]
    pub fn with_hmcr(mut self, hmcr: f64) -> Self {
        self.hmcr = hmcr;
        self
    }

    /// Set PAR.
    #[must_use]
    pub fn with_par(mut self, par: f64) -> Self {
        self.par = par;
        self
    }

    /// Set pitch bandwidth.
    #[must_use]
    pub fn with_bandwidth(mut self, bandwidth: f64) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    /// Set random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = rng_from(self.seed);
        self
    }

    fn improvise(&mut self, source: &Agent) -> Agent {
        let mut harmony = source.clone();

        if self.rng.random::<f64>() < self.hmcr {
            if self.rng.random::<f64>() < self.par {
                let shift = uniform(&mut self.rng, -1.0, 1.0) * self.bandwidth;
                for x in harmony.position_mut() {
                    *x += shift;
                }
            }
        } else {
            let bounds: Vec<(f64, f64)> = source
                .lower_bound()
                .iter()
                .copied()
                .zip(source.upper_bound().iter().copied())
                .collect();
            for (x, (lo, hi)) in harmony.position_mut().iter_mut().zip(bounds) {
                *x = uniform(&mut self.rng, lo, hi);
            }
        }
        harmony
    }
}

impl Metaheuristic for HarmonySearch {
    fn name(&self) -> &'static str {
        NAME
    }

    fn set_hyperparameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "hmcr" | "HMCR" | "WHMCR" => self.hmcr = as_probability(name, value)?,
            "par" | "PAR" => self.par = as_probability(name, value)?,
            "bw" | "bandwidth" => self.bandwidth = as_finite(name, value)?,
            _ => return Err(OptimizeError::unknown_hyperparameter(NAME, name)),
        }
        Ok(())
    }

    fn decorate(&mut self, population: &[Agent], members: &[usize]) -> Result<()> {
        self.memory = decorate(NAME, &self.memory, population, members, |_| ())?;
        Ok(())
    }

    fn members(&self) -> Vec<usize> {
        indices(&self.memory)
    }

    fn evaluate(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
    ) -> Result<()> {
        evaluate_members(NAME, &self.memory, agents, best, function)
    }

    fn update(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
        _iteration: Iteration,
    ) -> Result<()> {
        check_ready(NAME, &self.memory, agents, best)?;

        let k = integer(&mut self.rng, 0, self.memory.len() - 1);
        let source = self.memory[k].agent(agents).clone();
        let mut harmony = self.improvise(&source);
        harmony.clip();
        harmony.set_fitness(function.calculate(harmony.position())?);

        sort_by_fitness(&mut self.memory, agents);
        if let Some(worst) = self.memory.last() {
            let worst = worst.agent_mut(agents);
            if harmony.is_better_than(worst) {
                worst.clone_from(&harmony);
            }
        }

        clip_all(&self.memory, agents);
        self.evaluate(agents, best, function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Hyperparameters, SearchSpace};

    fn sphere() -> Function {
        Function::new("sphere", |x: &[f64]| x.iter().map(|xi| xi * xi).sum())
    }

    #[test]
    fn test_hs_sphere() {
        let mut space = SearchSpace::new(30, 2, 2000)
            .with_seed(42)
            .continuous(-5.0, 5.0)
            .expect("space");
        let mut hs = HarmonySearch::default().with_seed(42);
        let result = space.run(&mut hs, &sphere()).expect("run");
        assert!(result.best_fitness < 1.0, "best {}", result.best_fitness);
    }

    #[test]
    fn test_hs_builder() {
        let hs = HarmonySearch::default()
            .with_hmcr(0.9)
            .with_par(0.3)
            .with_bandwidth(0.01)
            .with_seed(123);
        assert!((hs.hmcr - 0.9).abs() < 1e-10);
        assert!((hs.par - 0.3).abs() < 1e-10);
        assert!((hs.bandwidth - 0.01).abs() < 1e-10);
    }

    #[test]
    fn test_hs_hyperparameters() {
        let params = Hyperparameters::new().with("WHMCR", 0.95).with("bw", 0.5);
        let hs = HarmonySearch::with_hyperparameters(&params).expect("valid");
        assert_eq!((hs.hmcr, hs.par, hs.bandwidth), (0.95, 0.7, 0.5));
        let params = Hyperparameters::new().with("par", 2.0);
        assert!(HarmonySearch::with_hyperparameters(&params).is_err());
    }

    #[test]
    fn test_hs_worst_never_gets_worse() {
        let mut space = SearchSpace::new(6, 2, 1)
            .with_seed(8)
            .continuous(-5.0, 5.0)
            .expect("space");
        let function = sphere();
        let mut hs = HarmonySearch::default().with_seed(8);
        hs.decorate(space.agents(), &[0, 1, 2, 3, 4, 5]).expect("decorate");
        let (agents, best) = space.state_mut();
        hs.evaluate(agents, best, &function).expect("evaluate");
        let worst_before = agents.iter().map(Agent::fitness).fold(f64::MIN, f64::max);

        for t in 0..20 {
            hs.update(agents, best, &function, Iteration::new(t, 20)).expect("update");
        }
        let worst_after = agents.iter().map(Agent::fitness).fold(f64::MIN, f64::max);
        assert!(worst_after <= worst_before);
    }
}
