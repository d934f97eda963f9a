//! Particle Swarm Optimization (PSO).
//!
//! Simulates the social behavior of bird flocks: each particle is pulled
//! towards its own best position and towards the swarm's global best.
//!
//! # Algorithm
//!
//! ```text
//! For each particle i (r1, r2 ~ U[0, 1) drawn once per particle):
//!   v = w·v + c1·r1·(pbest - x) + c2·r2·(gbest - x)
//!   x = x + v
//! ```
//!
//! # References
//!
//! - Kennedy & Eberhart (1995): "Particle Swarm Optimization"
//! - Kennedy, Eberhart & Shi (2001): "Swarm Intelligence"

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::decorator::{clip_all, decorate, ensure_decorated, indices};
use crate::core::hyperparams::as_finite;
use crate::core::traits::check_ready;
use crate::core::{Agent, Decorated, Function, Iteration, Metaheuristic, Particle};
use crate::error::{OptimizeError, Result};
use crate::math::stochastic::{entropy_rng, rng_from};

const NAME: &str = "PSO";

/// Particle Swarm optimizer.
///
/// Hyperparameter names: `w`, `c1`, `c2`.
///
/// # Example
///
/// ```
/// use metaswarm::core::{Function, SearchSpace};
/// use metaswarm::metaheuristics::ParticleSwarm;
///
/// let sphere = Function::new("sphere", |x: &[f64]| x.iter().map(|xi| xi * xi).sum());
/// let mut space = SearchSpace::new(20, 2, 100).with_seed(42).continuous(-5.0, 5.0).unwrap();
/// let mut pso = ParticleSwarm::default().with_seed(42);
///
/// let result = space.run(&mut pso, &sphere).unwrap();
/// assert!(result.best_fitness < 0.1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleSwarm {
    /// Inertia weight (default: 0.7)
    pub w: f64,
    /// Cognitive constant (default: 1.7)
    pub c1: f64,
    /// Social constant (default: 1.7)
    pub c2: f64,
    /// Random seed
    #[serde(default)]
    seed: Option<u64>,

    #[serde(skip)]
    particles: Vec<Decorated<Particle>>,
    #[serde(skip, default = "entropy_rng")]
    rng: StdRng,
}

impl Default for ParticleSwarm {
    fn default() -> Self {
        Self {
            w: 0.7,
            c1: 1.7,
            c2: 1.7,
            seed: None,
            particles: Vec::new(),
            rng: entropy_rng(),
        }
    }
}

impl ParticleSwarm {
    /// Set inertia weight.
    #[must_use]
    pub fn with_inertia(mut self, w: f64) -> Self {
        self.w = w;
        self
    }

    /// Set cognitive and social constants.
    #[must_use]
    pub fn with_constants(mut self, c1: f64, c2: f64) -> Self {
        self.c1 = c1;
        self.c2 = c2;
        self
    }

    /// Set random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = rng_from(self.seed);
        self
    }

    /// Velocity and personal best of every owned particle.
    #[must_use]
    pub fn particles(&self) -> &[Decorated<Particle>] {
        &self.particles
    }
}

impl Metaheuristic for ParticleSwarm {
    fn name(&self) -> &'static str {
        NAME
    }

    fn set_hyperparameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "w" | "W" => self.w = as_finite(name, value)?,
            "c1" | "C1" => self.c1 = as_finite(name, value)?,
            "c2" | "C2" => self.c2 = as_finite(name, value)?,
            _ => return Err(OptimizeError::unknown_hyperparameter(NAME, name)),
        }
        Ok(())
    }

    fn decorate(&mut self, population: &[Agent], members: &[usize]) -> Result<()> {
        self.particles = decorate(NAME, &self.particles, population, members, Particle::new)?;
        Ok(())
    }

    fn members(&self) -> Vec<usize> {
        indices(&self.particles)
    }

    /// A particle's fitness and personal best move only when its new
    /// position beats its own previous fitness. The global best is then
    /// compared against the personal best.
    fn evaluate(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
    ) -> Result<()> {
        ensure_decorated(NAME, &self.particles, agents)?;
        for particle in &mut self.particles {
            let (agent, state) = particle.split_mut(agents);
            let fitness = function.calculate(agent.position())?;

            if fitness < agent.fitness() {
                agent.set_fitness(fitness);
                state.best_position.copy_from_slice(agent.position());
            }

            if agent.is_better_than(best) {
                best.clone_from(agent);
                best.set_position(&state.best_position)?;
            }
        }
        Ok(())
    }

    fn update(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
        _iteration: Iteration,
    ) -> Result<()> {
        check_ready(NAME, &self.particles, agents, best)?;

        for particle in &mut self.particles {
            let r1: f64 = self.rng.random();
            let r2: f64 = self.rng.random();
            let (agent, state) = particle.split_mut(agents);
            let global = best.position();

            for (j, x) in agent.position_mut().iter_mut().enumerate() {
                state.velocity[j] = self.w * state.velocity[j]
                    + self.c1 * r1 * (state.best_position[j] - *x)
                    + self.c2 * r2 * (global[j] - *x);
                *x += state.velocity[j];
            }
        }

        clip_all(&self.particles, agents);
        self.evaluate(agents, best, function)
    }
}
