//! Population-based metaheuristics.
//!
//! Every algorithm implements [`Metaheuristic`](crate::core::Metaheuristic):
//! it is decorated with a subset of a [`SearchSpace`](crate::core::SearchSpace)
//! population, keeps its per-agent state alongside those indices, and moves
//! only its own agents on each update. The space drives the iteration loop.
//!
//! # Algorithms
//!
//! ## Swarm Intelligence
//! - [`ParticleSwarm`] - Velocity updates towards personal and global bests
//! - [`BatAlgorithm`] - Echolocation frequency, loudness and pulse rate
//! - [`BeeColony`] - Employed, onlooker and scout bees
//! - [`Firefly`] - Attraction decaying with distance
//! - [`MantaRay`] - Chain, cyclone and somersault foraging
//!
//! ## Physics and Nature Inspired
//! - [`BlackHole`] - Stars drawn into the best agent, swallowed at the horizon
//! - [`WaterCycle`] - Streams flowing into rivers and the sea
//! - [`ElectromagneticField`] - Positive, negative and neutral fields
//! - [`SineCosine`] - Oscillation around the best with shrinking amplitude
//!
//! ## Memory Based
//! - [`HarmonySearch`] - Music-inspired improvisation
//!
//! ## Benchmark Functions
//! - [`benchmarks`] - Sphere, Rosenbrock, Rastrigin, Ackley and friends
//!
//! # Example
//!
//! ```
//! use metaswarm::core::{Function, SearchSpace};
//! use metaswarm::metaheuristics::{benchmarks, ParticleSwarm};
//!
//! let mut space = SearchSpace::new(20, 2, 100)
//!     .with_seed(42)
//!     .continuous(-5.0, 5.0)
//!     .expect("valid bounds");
//!
//! let function = Function::new("sphere", benchmarks::sphere);
//! let mut pso = ParticleSwarm::default().with_seed(42);
//! let result = space.run(&mut pso, &function).expect("run succeeds");
//!
//! assert!(result.best_fitness < 1.0);
//! ```
//!
//! # References
//!
//! - Kennedy & Eberhart (1995): Particle Swarm Optimization
//! - Yang (2010): A New Metaheuristic Bat-Inspired Algorithm
//! - Karaboga (2005): An Idea Based on Honey Bee Swarm for Numerical Optimization
//! - Geem et al. (2001): Harmony Search

pub mod benchmarks;
mod abc;
mod ba;
mod bh;
mod efo;
mod fa;
mod hs;
mod mrfo;
mod pso;
mod sca;
mod wca;

pub use abc::BeeColony;
pub use ba::BatAlgorithm;
pub use bh::BlackHole;
pub use efo::ElectromagneticField;
pub use fa::Firefly;
pub use hs::HarmonySearch;
pub use mrfo::MantaRay;
pub use pso::ParticleSwarm;
pub use sca::SineCosine;
pub use wca::WaterCycle;


#[cfg(test)]
#[path = "tests_pso_contract.rs"]
mod tests_pso_contract;
