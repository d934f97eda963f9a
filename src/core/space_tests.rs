use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::core::decorator::{clip_all, decorate, Plain};
use crate::core::traits::evaluate_members;
use crate::core::Decorated;
use crate::metaheuristics::ParticleSwarm;

fn sphere() -> Function {
    Function::new("sphere", |x: &[f64]| x.iter().map(|v| v * v).sum())
}

/// Moves nothing; records which agents it was given.
#[derive(Default)]
struct Recorder {
    members: Vec<Plain>,
    updates: usize,
}

impl Metaheuristic for Recorder {
    fn name(&self) -> &'static str {
        "REC"
    }

    fn set_hyperparameter(&mut self, name: &str, _value: f64) -> Result<()> {
        Err(OptimizeError::UnknownHyperparameter {
            algorithm: "REC",
            name: name.to_string(),
        })
    }

    fn decorate(&mut self, population: &[Agent], members: &[usize]) -> Result<()> {
        self.members = decorate("REC", &self.members, population, members, |_| ())?;
        Ok(())
    }

    fn members(&self) -> Vec<usize> {
        self.members.iter().map(Decorated::index).collect()
    }

    fn evaluate(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
    ) -> Result<()> {
        evaluate_members("REC", &self.members, agents, best, function)
    }

    fn update(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
        _iteration: Iteration,
    ) -> Result<()> {
        self.updates += 1;
        clip_all(&self.members, agents);
        self.evaluate(agents, best, function)
    }
}

/// One lifecycle call seen by a [`Logged`] algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Decorate(&'static str),
    Evaluate(&'static str),
    Update(&'static str, usize),
}

/// Wraps a [`Recorder`] and appends every lifecycle call to a shared log.
struct Logged {
    name: &'static str,
    inner: Recorder,
    log: Rc<RefCell<Vec<Event>>>,
}

impl Logged {
    fn boxed(name: &'static str, log: &Rc<RefCell<Vec<Event>>>) -> Box<dyn Metaheuristic> {
        Box::new(Self {
            name,
            inner: Recorder::default(),
            log: Rc::clone(log),
        })
    }
}

impl Metaheuristic for Logged {
    fn name(&self) -> &'static str {
        self.name
    }

    fn set_hyperparameter(&mut self, name: &str, value: f64) -> Result<()> {
        self.inner.set_hyperparameter(name, value)
    }

    fn decorate(&mut self, population: &[Agent], members: &[usize]) -> Result<()> {
        self.log.borrow_mut().push(Event::Decorate(self.name));
        self.inner.decorate(population, members)
    }

    fn members(&self) -> Vec<usize> {
        self.inner.members()
    }

    fn evaluate(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
    ) -> Result<()> {
        self.log.borrow_mut().push(Event::Evaluate(self.name));
        self.inner.evaluate(agents, best, function)
    }

    fn update(
        &mut self,
        agents: &mut [Agent],
        best: &mut Agent,
        function: &Function,
        iteration: Iteration,
    ) -> Result<()> {
        self.log
            .borrow_mut()
            .push(Event::Update(self.name, iteration.current));
        self.inner.update(agents, best, function, iteration)
    }
}

#[test]
fn test_scenario_clip_keeps_inside_and_clamps_outside() {
    let mut space = SearchSpace::new(1, 1, 1)
        .with_seed(3)
        .continuous(-10.0, 10.0)
        .expect("valid space");
    space.agents_mut()[0].position_mut()[0] = 5.0;
    space.clip_limits();
    assert_eq!(space.agents()[0].position()[0], 5.0);

    space.agents_mut()[0].position_mut()[0] = 20.0;
    space.clip_limits();
    assert_eq!(space.agents()[0].position()[0], 10.0);
}

#[test]
fn test_initialize_draws_inside_bounds() {
    let space = SearchSpace::new(20, 3, 1)
        .with_seed(11)
        .bounded(&[-1.0, 0.0, 100.0], &[1.0, 0.5, 200.0])
        .expect("valid space");
    for agent in space.agents() {
        assert!(agent.is_within_bounds());
        assert_eq!(agent.lower_bound(), &[-1.0, 0.0, 100.0]);
        assert_eq!(agent.fitness(), f64::INFINITY);
    }
}

#[test]
fn test_seeded_initialization_is_reproducible() {
    let a = SearchSpace::new(5, 2, 1).with_seed(99).continuous(-3.0, 3.0).expect("a");
    let b = SearchSpace::new(5, 2, 1).with_seed(99).continuous(-3.0, 3.0).expect("b");
    assert_eq!(a.agents(), b.agents());
}

#[test]
fn test_degenerate_bounds_are_allowed() {
    let space = SearchSpace::new(3, 1, 1).continuous(2.0, 2.0).expect("lo == hi");
    assert!(space.agents().iter().all(|a| a.position()[0] == 2.0));
}

#[test]
fn test_build_rejects_dimension_mismatch() {
    let mut space = SearchSpace::new(4, 2, 1);
    let err = space.build(&[0.0], &[1.0, 1.0]).unwrap_err();
    assert!(matches!(err, OptimizeError::DimensionMismatch { expected: 2, actual: 1, .. }));
    assert!(!space.is_built());
}

#[test]
fn test_build_rejects_inverted_bounds() {
    let mut space = SearchSpace::new(4, 2, 1);
    let err = space.build(&[0.0, 5.0], &[1.0, 4.0]).unwrap_err();
    assert!(matches!(err, OptimizeError::InvalidBounds { index: 1, .. }));
}

#[test]
fn test_build_rejects_empty_population() {
    let mut space = SearchSpace::new(0, 2, 1);
    assert!(matches!(
        space.build(&[0.0, 0.0], &[1.0, 1.0]),
        Err(OptimizeError::EmptyPopulation { .. })
    ));
}

#[test]
fn test_unbuilt_space_refuses_to_run() {
    let mut space = SearchSpace::new(4, 2, 1);
    assert!(matches!(space.initialize_agents(), Err(OptimizeError::SpaceNotBuilt)));
    let mut recorder = Recorder::default();
    assert!(matches!(
        space.run(&mut recorder, &sphere()),
        Err(OptimizeError::SpaceNotBuilt)
    ));
}

#[test]
fn test_best_agent_starts_as_sentinel() {
    let space = SearchSpace::new(4, 3, 1).continuous(-1.0, 1.0).expect("space");
    assert_eq!(space.best_agent().fitness(), f64::INFINITY);
    assert_eq!(space.best_agent().position(), &[0.0, 0.0, 0.0]);
}

#[test]
fn test_scenario_infinite_objective_records_no_improvement() {
    let mut space = SearchSpace::new(5, 2, 1).with_seed(1).continuous(-5.0, 5.0).expect("space");
    let function = Function::new("inf", |_: &[f64]| f64::INFINITY);
    let mut recorder = Recorder::default();
    let members: Vec<usize> = (0..5).collect();
    recorder.decorate(space.agents(), &members).expect("decorate");

    let (agents, best) = space.state_mut();
    recorder.evaluate(agents, best, &function).expect("evaluate");

    assert_eq!(space.best_agent().fitness(), f64::INFINITY);
    assert_eq!(space.best_agent().position(), &[0.0, 0.0]);
}

#[test]
fn test_run_counts_iterations_and_evaluations() {
    let mut space = SearchSpace::new(6, 2, 4).with_seed(5).continuous(-5.0, 5.0).expect("space");
    let function = sphere();
    let mut recorder = Recorder::default();
    let result = space.run(&mut recorder, &function).expect("run");

    assert_eq!(recorder.updates, 4);
    assert_eq!(result.history.len(), 5);
    assert_eq!(result.evaluations, 6 * 5);
    assert_eq!(result.best_fitness, space.best_agent().fitness());
    assert_eq!(result.best_position, space.best_agent().position().to_vec());
}

#[test]
fn test_scenario_pso_best_never_worsens() {
    let mut space = SearchSpace::new(10, 2, 50).with_seed(42).continuous(-5.0, 5.0).expect("space");
    let mut pso = ParticleSwarm::default().with_seed(42);
    let result = space.run(&mut pso, &sphere()).expect("run");

    assert!(result.history[50] <= result.history[1]);
    assert!(result.is_monotonic());
}

#[test]
fn test_scenario_round_robin_partition() {
    assert_eq!(spread_agents(4, 2).expect("partition"), vec![vec![0, 2], vec![1, 3]]);
}

#[test]
fn test_spread_agents_uneven() {
    let partitions = spread_agents(5, 3).expect("partition");
    assert_eq!(partitions, vec![vec![0, 3], vec![1, 4], vec![2]]);
}

#[test]
fn test_spread_agents_requires_algorithms() {
    assert!(matches!(spread_agents(4, 0), Err(OptimizeError::NoMetaheuristics)));
}

#[test]
fn test_run_many_assigns_disjoint_partitions() {
    let mut space = SearchSpace::new(4, 2, 3)
        .with_seed(8)
        .continuous(-1.0, 1.0)
        .expect("space");
    let mut algorithms: Vec<Box<dyn Metaheuristic>> =
        vec![Box::new(Recorder::default()), Box::new(Recorder::default())];
    let result = space.run_many(&mut algorithms, &sphere()).expect("run");

    assert_eq!(algorithms[0].members(), vec![0, 2]);
    assert_eq!(algorithms[1].members(), vec![1, 3]);
    assert_eq!(result.history.len(), 2 * 3 + 1);
}

#[test]
fn test_run_many_runs_algorithms_one_after_another() {
    const N: usize = 3;
    let mut space = SearchSpace::new(4, 2, N)
        .with_seed(8)
        .continuous(-1.0, 1.0)
        .expect("space");
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut algorithms = vec![Logged::boxed("A", &log), Logged::boxed("B", &log)];
    space.run_many(&mut algorithms, &sphere()).expect("run");

    let log = log.borrow();
    let updates: Vec<Event> = log
        .iter()
        .copied()
        .filter(|event| matches!(event, Event::Update(..)))
        .collect();
    let expected: Vec<Event> = ["A", "B"]
        .into_iter()
        .flat_map(|name| (0..N).map(move |t| Event::Update(name, t)))
        .collect();
    assert_eq!(updates, expected);

    let first_update = log
        .iter()
        .position(|event| matches!(event, Event::Update(..)))
        .expect("at least one update");
    assert_eq!(
        &log[..first_update],
        &[
            Event::Decorate("A"),
            Event::Decorate("B"),
            Event::Evaluate("A"),
            Event::Evaluate("B"),
        ]
    );
}

#[test]
fn test_run_many_rejects_empty_list() {
    let mut space = SearchSpace::new(4, 2, 3).continuous(-1.0, 1.0).expect("space");
    let mut algorithms: Vec<Box<dyn Metaheuristic>> = Vec::new();
    assert!(matches!(
        space.run_many(&mut algorithms, &sphere()),
        Err(OptimizeError::NoMetaheuristics)
    ));
}

#[test]
fn test_run_many_rejects_empty_partition() {
    let mut space = SearchSpace::new(1, 2, 3).continuous(-1.0, 1.0).expect("space");
    let mut algorithms: Vec<Box<dyn Metaheuristic>> =
        vec![Box::new(Recorder::default()), Box::new(Recorder::default())];
    assert!(matches!(
        space.run_many(&mut algorithms, &sphere()),
        Err(OptimizeError::EmptyPopulation { .. })
    ));
}

#[test]
fn test_objective_failure_aborts_run() {
    let mut space = SearchSpace::new(3, 1, 5).continuous(-1.0, 1.0).expect("space");
    let function = Function::fallible("broken", |_: &[f64]| Err::<f64, _>("boom"));
    let mut recorder = Recorder::default();
    let err = space.run(&mut recorder, &function).unwrap_err();
    assert!(!err.is_configuration());
    assert_eq!(recorder.updates, 0);
}
