// =========================================================================
// FALSIFY-MH (PSO): search-space contract for the canonical swarm
//
// Each test states one claim about a PSO run driven by a SearchSpace and
// fails with a "FALSIFIED MH-00x" message if the claim does not hold.
//
// References:
//   - Kennedy & Eberhart (1995) "Particle Swarm Optimization"
// =========================================================================

use super::*;
use crate::core::{Function, SearchSpace};

fn sphere() -> Function {
    Function::new("sphere", benchmarks::sphere)
}

/// FALSIFY-MH-001: PSO finds near-optimal on sphere function f(x)=Σx²
#[test]
fn falsify_mh_001_pso_sphere_convergence() {
    let mut space = SearchSpace::new(20, 2, 250)
        .with_seed(42)
        .continuous(-5.0, 5.0)
        .expect("space");
    let mut pso = ParticleSwarm::default().with_seed(42);
    let result = space.run(&mut pso, &sphere()).expect("run");

    assert!(
        result.best_fitness < 1.0,
        "FALSIFIED MH-001: PSO sphere objective {} >= 1.0",
        result.best_fitness
    );
}

/// FALSIFY-MH-002: PSO solution dimension matches search space
#[test]
fn falsify_mh_002_pso_solution_dimension() {
    let mut space = SearchSpace::new(10, 3, 20)
        .with_seed(42)
        .continuous(-5.0, 5.0)
        .expect("space");
    let mut pso = ParticleSwarm::default().with_seed(42);
    let result = space.run(&mut pso, &sphere()).expect("run");

    assert_eq!(
        result.best_position.len(),
        3,
        "FALSIFIED MH-002: solution dim {} != search space dim 3",
        result.best_position.len()
    );
}

/// FALSIFY-MH-003: PSO solution stays within bounds
#[test]
fn falsify_mh_003_pso_within_bounds() {
    let mut space = SearchSpace::new(10, 3, 50)
        .with_seed(42)
        .continuous(-2.0, 2.0)
        .expect("space");
    let mut pso = ParticleSwarm::default().with_seed(42);
    let result = space.run(&mut pso, &sphere()).expect("run");

    for (i, &v) in result.best_position.iter().enumerate() {
        assert!(
            (-2.0..=2.0).contains(&v),
            "FALSIFIED MH-003: solution[{i}]={v} outside bounds [-2, 2]"
        );
    }
}

/// FALSIFY-MH-004: best fitness never increases between iterations
#[test]
fn falsify_mh_004_pso_history_monotonic() {
    let mut space = SearchSpace::new(15, 4, 60)
        .with_seed(3)
        .continuous(-10.0, 10.0)
        .expect("space");
    let mut pso = ParticleSwarm::default().with_seed(3);
    let rastrigin = Function::new("rastrigin", benchmarks::rastrigin);
    let result = space.run(&mut pso, &rastrigin).expect("run");

    for (t, window) in result.history.windows(2).enumerate() {
        assert!(
            window[1] <= window[0],
            "FALSIFIED MH-004: best rose from {} to {} at iteration {}",
            window[0],
            window[1],
            t + 1
        );
    }
}

/// FALSIFY-MH-005: evaluation count equals agents x (iterations + 1)
#[test]
fn falsify_mh_005_pso_evaluation_budget() {
    let mut space = SearchSpace::new(7, 2, 9)
        .with_seed(1)
        .continuous(-1.0, 1.0)
        .expect("space");
    let function = sphere();
    let mut pso = ParticleSwarm::default().with_seed(1);
    let result = space.run(&mut pso, &function).expect("run");

    assert_eq!(
        result.evaluations,
        7 * 10,
        "FALSIFIED MH-005: {} evaluations for 7 agents over 9 iterations",
        result.evaluations
    );
    assert_eq!(function.evaluations(), result.evaluations);
}
