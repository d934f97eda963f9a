//! Core engine: agents, capability extensions, objective functions, the
//! metaheuristic contract and the search space that drives it.

pub mod agent;
pub mod decorator;
pub mod function;
pub mod hyperparams;
pub mod result;
pub mod space;
pub mod traits;

pub use agent::Agent;
pub use decorator::{Bat, Decorated, Particle, Plain};
pub use function::Function;
pub use hyperparams::Hyperparameters;
pub use result::OptimizationResult;
pub use space::{spread_agents, SearchSpace};
pub use traits::{Iteration, Metaheuristic};
