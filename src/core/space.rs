//! Search space: the population, its bounds and the global best agent.
//!
//! A space is built once, initialized once, then driven through exactly
//! `n_iterations` update rounds by one or more metaheuristics.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::core::agent::validate_bounds;
use crate::core::{Agent, Function, Iteration, Metaheuristic, OptimizationResult};
use crate::error::{OptimizeError, Result};

/// A bounded continuous search space holding the working population.
///
/// # Example
///
/// ```
/// use metaswarm::core::{Function, SearchSpace};
/// use metaswarm::metaheuristics::ParticleSwarm;
///
/// let mut space = SearchSpace::new(10, 2, 30)
///     .with_seed(7)
///     .continuous(-5.0, 5.0)
///     .unwrap();
/// let sphere = Function::new("sphere", |x: &[f64]| x.iter().map(|v| v * v).sum());
/// let result = space.run(&mut ParticleSwarm::default().with_seed(7), &sphere).unwrap();
/// assert!(result.best_fitness < 50.0);
/// ```
#[derive(Debug)]
pub struct SearchSpace {
    n_agents: usize,
    n_variables: usize,
    n_iterations: usize,
    lower_bound: Vec<f64>,
    upper_bound: Vec<f64>,
    agents: Vec<Agent>,
    best_agent: Agent,
    built: bool,
    seed: Option<u64>,
    rng: StdRng,
}

impl SearchSpace {
    /// Describe a space of `n_agents` agents with `n_variables` decision
    /// variables, to be driven for `n_iterations` update rounds.
    #[must_use]
    pub fn new(n_agents: usize, n_variables: usize, n_iterations: usize) -> Self {
        Self {
            n_agents,
            n_variables,
            n_iterations,
            lower_bound: Vec::new(),
            upper_bound: Vec::new(),
            agents: Vec::new(),
            best_agent: Agent::new(n_variables),
            built: false,
            seed: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seed the initialization RNG for reproducible populations.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Build with the same `[lower, upper]` range on every variable and
    /// draw the initial population.
    ///
    /// # Errors
    ///
    /// See [`SearchSpace::build`].
    pub fn continuous(self, lower: f64, upper: f64) -> Result<Self> {
        let n = self.n_variables;
        self.bounded(&vec![lower; n], &vec![upper; n])
    }

    /// Build with per-variable bounds and draw the initial population.
    ///
    /// # Errors
    ///
    /// See [`SearchSpace::build`].
    pub fn bounded(mut self, lower_bound: &[f64], upper_bound: &[f64]) -> Result<Self> {
        self.build(lower_bound, upper_bound)?;
        self.initialize_agents()?;
        Ok(self)
    }

    /// Fix the bounds and allocate the population. Every agent starts at
    /// the origin with `+inf` fitness; the best agent is an empty sentinel.
    ///
    /// # Errors
    ///
    /// Zero agents or variables, bound vectors whose length differs from
    /// `n_variables`, and inverted or non-finite bounds are rejected.
    pub fn build(&mut self, lower_bound: &[f64], upper_bound: &[f64]) -> Result<()> {
        if self.n_agents == 0 {
            return Err(OptimizeError::empty_population("search space with zero agents"));
        }
        if self.n_variables == 0 {
            return Err(OptimizeError::empty_population(
                "search space with zero decision variables",
            ));
        }
        if lower_bound.len() != self.n_variables {
            return Err(OptimizeError::dimension_mismatch(
                "lower bound",
                self.n_variables,
                lower_bound.len(),
            ));
        }
        if upper_bound.len() != self.n_variables {
            return Err(OptimizeError::dimension_mismatch(
                "upper bound",
                self.n_variables,
                upper_bound.len(),
            ));
        }
        validate_bounds(lower_bound, upper_bound)?;

        self.lower_bound = lower_bound.to_vec();
        self.upper_bound = upper_bound.to_vec();
        self.agents = (0..self.n_agents).map(|_| Agent::new(self.n_variables)).collect();
        self.best_agent = Agent::new(self.n_variables);
        self.built = true;

        debug!(
            n_agents = self.n_agents,
            n_variables = self.n_variables,
            "search space built"
        );
        Ok(())
    }

    /// Draw every position uniformly inside the bounds and record the
    /// bounds on each agent.
    ///
    /// # Errors
    ///
    /// Fails if the space has not been built.
    pub fn initialize_agents(&mut self) -> Result<()> {
        self.ensure_built()?;
        for agent in &mut self.agents {
            agent.set_bounds(&self.lower_bound, &self.upper_bound);
            for ((x, &lo), &hi) in agent
                .position_mut()
                .iter_mut()
                .zip(&self.lower_bound)
                .zip(&self.upper_bound)
            {
                *x = lo + self.rng.random::<f64>() * (hi - lo);
            }
        }
        Ok(())
    }

    /// Clip every agent of the population to its bounds.
    pub fn clip_limits(&mut self) {
        for agent in &mut self.agents {
            agent.clip();
        }
    }

    /// Drive one metaheuristic over the whole population.
    ///
    /// # Errors
    ///
    /// Fails if the space is not built, the algorithm refuses decoration,
    /// or any objective evaluation fails.
    pub fn run(
        &mut self,
        metaheuristic: &mut dyn Metaheuristic,
        function: &Function,
    ) -> Result<OptimizationResult> {
        self.ensure_built()?;
        let start = Instant::now();
        let evaluations = function.evaluations();
        info!(
            algorithm = metaheuristic.name(),
            function = function.name(),
            n_agents = self.n_agents,
            n_iterations = self.n_iterations,
            "starting optimization"
        );

        let members: Vec<usize> = (0..self.agents.len()).collect();
        metaheuristic.decorate(&self.agents, &members)?;
        metaheuristic.evaluate(&mut self.agents, &mut self.best_agent, function)?;

        let mut history = Vec::with_capacity(self.n_iterations + 1);
        history.push(self.best_agent.fitness());
        self.iterate(metaheuristic, function, &mut history)?;

        Ok(self.finish(start, function.evaluations() - evaluations, history))
    }

    /// Drive several metaheuristics over disjoint round-robin partitions of
    /// the population, all sharing one global best.
    ///
    /// Every algorithm is decorated and evaluated before any update runs.
    /// The algorithms then run their full iteration budgets one after
    /// another.
    ///
    /// # Errors
    ///
    /// An empty list, a partition with no agents (more algorithms than
    /// agents) and objective failures abort the run.
    pub fn run_many(
        &mut self,
        metaheuristics: &mut [Box<dyn Metaheuristic>],
        function: &Function,
    ) -> Result<OptimizationResult> {
        self.ensure_built()?;
        let start = Instant::now();
        let evaluations = function.evaluations();
        let partitions = spread_agents(self.agents.len(), metaheuristics.len())?;
        info!(
            algorithms = metaheuristics.len(),
            function = function.name(),
            n_agents = self.n_agents,
            n_iterations = self.n_iterations,
            "starting hyper-heuristic optimization"
        );

        for (metaheuristic, members) in metaheuristics.iter_mut().zip(&partitions) {
            debug!(
                algorithm = metaheuristic.name(),
                agents = members.len(),
                "assigned partition"
            );
            metaheuristic.decorate(&self.agents, members)?;
        }
        for metaheuristic in metaheuristics.iter_mut() {
            metaheuristic.evaluate(&mut self.agents, &mut self.best_agent, function)?;
        }

        let mut history = Vec::with_capacity(metaheuristics.len() * self.n_iterations + 1);
        history.push(self.best_agent.fitness());
        for metaheuristic in metaheuristics.iter_mut() {
            self.iterate(metaheuristic.as_mut(), function, &mut history)?;
        }

        Ok(self.finish(start, function.evaluations() - evaluations, history))
    }

    fn iterate(
        &mut self,
        metaheuristic: &mut dyn Metaheuristic,
        function: &Function,
        history: &mut Vec<f64>,
    ) -> Result<()> {
        for current in 0..self.n_iterations {
            metaheuristic.update(
                &mut self.agents,
                &mut self.best_agent,
                function,
                Iteration::new(current, self.n_iterations),
            )?;
            history.push(self.best_agent.fitness());
            debug!(
                algorithm = metaheuristic.name(),
                iteration = current + 1,
                n_iterations = self.n_iterations,
                best_fitness = self.best_agent.fitness(),
                "iteration complete"
            );
        }
        Ok(())
    }

    fn finish(&self, start: Instant, evaluations: usize, history: Vec<f64>) -> OptimizationResult {
        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            best_fitness = self.best_agent.fitness(),
            evaluations,
            elapsed_ms,
            "optimization finished"
        );
        OptimizationResult {
            best_position: self.best_agent.position().to_vec(),
            best_fitness: self.best_agent.fitness(),
            elapsed_ms,
            evaluations,
            history,
        }
    }

    fn ensure_built(&self) -> Result<()> {
        if self.built {
            Ok(())
        } else {
            Err(OptimizeError::SpaceNotBuilt)
        }
    }

    /// Number of agents.
    #[must_use]
    pub fn n_agents(&self) -> usize {
        self.n_agents
    }

    /// Number of decision variables.
    #[must_use]
    pub fn n_variables(&self) -> usize {
        self.n_variables
    }

    /// Number of update rounds per algorithm.
    #[must_use]
    pub fn n_iterations(&self) -> usize {
        self.n_iterations
    }

    /// Seed used for initialization, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether [`SearchSpace::build`] has succeeded.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Per-variable lower bounds.
    #[must_use]
    pub fn lower_bound(&self) -> &[f64] {
        &self.lower_bound
    }

    /// Per-variable upper bounds.
    #[must_use]
    pub fn upper_bound(&self) -> &[f64] {
        &self.upper_bound
    }

    /// The population.
    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// The population, mutably.
    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    /// The global best agent.
    #[must_use]
    pub fn best_agent(&self) -> &Agent {
        &self.best_agent
    }

    /// Split borrow of the population and the global best, for driving a
    /// metaheuristic by hand.
    pub fn state_mut(&mut self) -> (&mut [Agent], &mut Agent) {
        (&mut self.agents, &mut self.best_agent)
    }
}

/// Round-robin partition of `n_agents` indices across `n_algorithms`:
/// agent `k` goes to partition `k % n_algorithms`, keeping population order.
///
/// ```
/// use metaswarm::core::spread_agents;
///
/// let partitions = spread_agents(4, 2).unwrap();
/// assert_eq!(partitions, vec![vec![0, 2], vec![1, 3]]);
/// ```
///
/// # Errors
///
/// Returns [`OptimizeError::NoMetaheuristics`] when `n_algorithms` is zero.
pub fn spread_agents(n_agents: usize, n_algorithms: usize) -> Result<Vec<Vec<usize>>> {
    if n_algorithms == 0 {
        return Err(OptimizeError::NoMetaheuristics);
    }
    let mut partitions = vec![Vec::with_capacity(n_agents / n_algorithms + 1); n_algorithms];
    for k in 0..n_agents {
        partitions[k % n_algorithms].push(k);
    }
    Ok(partitions)
}

#[cfg(test)]
#[path = "space_tests.rs"]
mod tests;
