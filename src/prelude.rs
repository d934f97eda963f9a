//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use metaswarm::prelude::*;
//! ```

pub use crate::core::{
    Agent, Function, Hyperparameters, Iteration, Metaheuristic, OptimizationResult, SearchSpace,
};
pub use crate::error::{OptimizeError, Result};
pub use crate::metaheuristics::{
    BatAlgorithm, BeeColony, BlackHole, ElectromagneticField, Firefly, HarmonySearch, MantaRay,
    ParticleSwarm, SineCosine, WaterCycle,
};
pub use crate::optimizer::{Hyperheuristic, Optimizer};
