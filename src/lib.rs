//! Metaswarm: population-based metaheuristic optimization in pure Rust.
//!
//! Metaswarm minimizes black-box objectives with swarm and nature-inspired
//! metaheuristics. A [`SearchSpace`](core::SearchSpace) owns the population
//! and the global best; algorithms implementing
//! [`Metaheuristic`](core::Metaheuristic) move the agents they are bound to.
//! Several algorithms can share one population, each over its own
//! round-robin partition.
//!
//! # Quick Start
//!
//! ```
//! use metaswarm::prelude::*;
//!
//! let mut space = SearchSpace::new(20, 2, 100)
//!     .with_seed(42)
//!     .continuous(-10.0, 10.0)
//!     .unwrap();
//!
//! let function = Function::new("sphere", |x: &[f64]| x.iter().map(|xi| xi * xi).sum());
//! let mut pso = ParticleSwarm::default().with_seed(42);
//!
//! let result = space.run(&mut pso, &function).unwrap();
//! assert!(result.best_fitness < 1e-2);
//! assert!(result.is_monotonic());
//! ```
//!
//! # Modules
//!
//! - [`core`]: Agents, capability extensions, objective adapter, search space
//!   and the metaheuristic contract
//! - [`metaheuristics`]: Ten algorithms plus benchmark functions
//! - [`optimizer`]: Single- and multi-algorithm task drivers
//! - [`math`]: Distance, vector and random-number helpers
//! - [`error`]: Crate error type
//!
//! # Logging
//!
//! Runs emit [`tracing`] events (`info` per run, `debug` per iteration,
//! `trace` for notable algorithm events). No subscriber is installed.

pub mod core;
pub mod error;
pub mod math;
pub mod metaheuristics;
pub mod optimizer;
pub mod prelude;

pub use error::{OptimizeError, Result};
