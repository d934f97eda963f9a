//! Water Cycle Algorithm (WCA).
//!
//! The population is ranked into one sea (the best agent), `nsr - 1` rivers
//! and the remaining streams. Streams are assigned to the sea and rivers in
//! proportion to their flow intensity and flow towards them; rivers flow
//! towards the global best. Streams that get closer to the best than the
//! evaporation threshold `d_max` evaporate and rain down again near it.
//!
//! ```text
//! flow_k   = round(|f_k / Σ_{i<nsr} f_i| · (N - nsr))
//! stream  += r·C·(river - stream)         C = 2
//! river   += r·C·(x* - river)
//! if ‖stream - x*‖ < d_max: stream = x* + √0.1·N(0, 1)
//! d_max   -= d_max / T
//! ```
//!
//! # References
//!
//! - Eskandar et al. (2012): "Water cycle algorithm – A novel metaheuristic
//!   optimization method for solving constrained engineering optimization
//!   problems"

use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::decorator::{clip_all, decorate, indices, sort_by_fitness, Plain};
use crate::core::hyperparams::{as_count, as_finite};
use crate::core::traits::{check_ready, evaluate_members};
use crate::core::{Agent, Function, Iteration, Metaheuristic};
use crate::error::{OptimizeError, Result};
use crate::math::distance::euclidean;
use crate::math::stochastic::{entropy_rng, gaussian, rng_from};

const NAME: &str = "WCA";

/// Stream/river attraction constant.
const C: f64 = 2.0;

/// Water Cycle optimizer.
///
/// Hyperparameter names: `nsr`, `d_max`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterCycle {
    /// Number of rivers plus the sea (default: 2)
    pub nsr: usize,
    /// Initial evaporation threshold (default: 0.1)
    pub d_max: f64,
    /// Random seed
    #[serde(default)]
    seed: Option<u64>,

    #[serde(skip)]
    drops: Vec<Plain>,
    #[serde(skip)]
    flows: Vec<usize>,
    #[serde(skip)]
    evaporation: f64,
    #[serde(skip, default = "entropy_rng")]
    rng: StdRng,
}

impl Default for WaterCycle {
    fn default() -> Self {
        Self {
            nsr: 2,
            d_max: 0.1,
            seed: None,
            drops: Vec::new(),
            flows: Vec::new(),
            evaporation: 0.1,
            rng: entropy_rng(),
        }
    }
}

impl WaterCycle {
    /// Set the number of rivers plus the sea.
    ///
    /// Unchecked here; [`Metaheuristic::decorate`] requires
    /// `1 <= nsr < number of agents`.
    #[must_use]
    pub fn with_rivers(mut self, nsr: usize) -> Self {
        self.nsr = nsr;
        self
    }

    /// Set the initial evaporation threshold.
    ///
    /// Unchecked here; [`Metaheuristic::decorate`] rejects non-finite values.
    #[must_use]
    pub fn with_evaporation(mut self, d_max: f64) -> Self {
        self.d_max = d_max;
        self
    }

    /// Set random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = rng_from(self.seed);
        self
    }

    /// Streams assigned to the sea and to each river. Empty until the
    /// first update has ranked the population.
    #[must_use]
    pub fn flows(&self) -> &[usize] {
        &self.flows
    }

    /// Current evaporation threshold.
    #[must_use]
    pub fn evaporation(&self) -> f64 {
        self.evaporation
    }

    /// Split the streams among the sea and rivers. Rivers are served first,
    /// the sea takes whatever is left so every stream has exactly one owner.
    fn flow_intensity(&self, agents: &[Agent]) -> Vec<usize> {
        let streams = self.drops.len() - self.nsr;
        let cost: f64 = self.drops[..self.nsr]
            .iter()
            .map(|d| d.agent(agents).fitness())
            .sum();

        let mut flows: Vec<usize> = self.drops[..self.nsr]
            .iter()
            .map(|d| {
                let share = (d.agent(agents).fitness() / cost).abs();
                if share.is_finite() {
                    (share * streams as f64).round() as usize
                } else {
                    streams / self.nsr
                }
            })
            .collect();

        let mut remaining = streams;
        for flow in flows.iter_mut().skip(1) {
            *flow = (*flow).min(remaining);
            remaining -= *flow;
        }
        flows[0] = remaining;
        flows
    }

    fn update_stream(&mut self, agents: &mut [Agent]) {
        let mut start = self.nsr;
        for (k, &flow) in self.flows.iter().enumerate() {
            let target = self.drops[k].agent(agents).position().to_vec();
            for stream in &self.drops[start..start + flow] {
                let r1: f64 = self.rng.random();
                for (x, &t) in stream.agent_mut(agents).position_mut().iter_mut().zip(&target) {
                    *x += r1 * C * (t - *x);
                }
            }
            start += flow;
        }
    }

    fn update_river(&mut self, agents: &mut [Agent], best: &Agent) {
        for river in &self.drops[1..self.nsr] {
            let r1: f64 = self.rng.random();
            for (x, &b) in river.agent_mut(agents).position_mut().iter_mut().zip(best.position()) {
                *x += r1 * C * (b - *x);
            }
        }
    }

    fn raining_process(&mut self, agents: &mut [Agent], best: &Agent) -> Result<()> {
        for stream in &self.drops[self.nsr..] {
            let agent = stream.agent_mut(agents);
            if euclidean(agent.position(), best.position())? < self.evaporation {
                trace!(stream = stream.index(), "stream evaporated, raining near the sea");
                for (x, &b) in agent.position_mut().iter_mut().zip(best.position()) {
                    *x = b + 0.1_f64.sqrt() * gaussian(&mut self.rng, 0.0, 1.0);
                }
            }
        }
        Ok(())
    }
}

impl Metaheuristic for WaterCycle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn set_hyperparameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "nsr" => self.nsr = as_count(name, value, 1)?,
            "d_max" => self.d_max = as_finite(name, value)?,
            _ => return Err(OptimizeError::unknown_hyperparameter(NAME, name)),
        }
        Ok(())
    }

    fn decorate(&mut self, population: &[Agent], members: &[usize]) -> Result<()> {
        as_finite("d_max", self.d_max)?;
        let drops = decorate(NAME, &self.drops, population, members, |_| ())?;
        if self.nsr == 0 || self.nsr >= drops.len() {
            return Err(OptimizeError::invalid_hyperparameter(
                "nsr",
                self.nsr as f64,
                &format!("1 <= nsr < number of agents ({})", drops.len()),
            ));
        }
        self.drops = drops;
        self.flows.clear();
        self.evaporation = self.d_max;
        Ok(())
    }

    fn members(&self) -> Vec<usize> {
        indices(&self.drops)
    }

    fn evaluate(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
    ) -> Result<()> {
        evaluate_members(NAME, &self.drops, agents, best, function)
    }

    fn update(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
        iteration: Iteration,
    ) -> Result<()> {
        check_ready(NAME, &self.drops, agents, best)?;

        sort_by_fitness(&mut self.drops, agents);
        if self.flows.is_empty() {
            self.flows = self.flow_intensity(agents);
        }

        self.update_stream(agents);
        self.update_river(agents, best);
        self.raining_process(agents, best)?;

        clip_all(&self.drops, agents);
        self.evaluate(agents, best, function)?;

        self.evaporation -= self.evaporation / iteration.total.max(1) as f64;
        Ok(())
    }
}
