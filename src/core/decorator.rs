//! Capability extensions: algorithm-private state bound to a population slot.
//!
//! An extension never copies the agent it decorates. It stores the agent's
//! index into the search space's population together with the extra fields
//! one algorithm needs (velocity, personal best, ...). Reads and writes of
//! the base fields go through [`Decorated::agent`] / [`Decorated::agent_mut`],
//! so a move made through the extension is immediately visible in the
//! population, and vice versa.
//!
//! ```text
//! population:  [ a0 ][ a1 ][ a2 ][ a3 ]
//!                 ^           ^
//! PSO:  Decorated{index: 0, Particle{..}}, Decorated{index: 2, Particle{..}}
//! ```

use serde::{Deserialize, Serialize};

use crate::core::Agent;
use crate::error::{OptimizeError, Result};

/// An agent slot decorated with algorithm-private state `E`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decorated<E> {
    index: usize,
    /// Algorithm-private fields.
    pub state: E,
}

/// A decorated slot with no extra state.
pub type Plain = Decorated<()>;

impl<E> Decorated<E> {
    /// Bind `state` to the agent at `index`.
    #[must_use]
    pub fn new(index: usize, state: E) -> Self {
        Self { index, state }
    }

    /// Index of the wrapped agent in the population.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The wrapped agent.
    ///
    /// # Panics
    ///
    /// Panics if `agents` is shorter than the population this slot was
    /// decorated from.
    #[must_use]
    pub fn agent<'a>(&self, agents: &'a [Agent]) -> &'a Agent {
        &agents[self.index]
    }

    /// The wrapped agent, mutably.
    ///
    /// # Panics
    ///
    /// See [`Decorated::agent`].
    pub fn agent_mut<'a>(&self, agents: &'a mut [Agent]) -> &'a mut Agent {
        &mut agents[self.index]
    }

    /// Split borrow: the wrapped agent mutably plus this extension's state.
    ///
    /// # Panics
    ///
    /// See [`Decorated::agent`].
    pub fn split_mut<'a>(&'a mut self, agents: &'a mut [Agent]) -> (&'a mut Agent, &'a mut E) {
        (&mut agents[self.index], &mut self.state)
    }
}

/// Particle extension: velocity and personal best position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Current velocity, one entry per variable.
    pub velocity: Vec<f64>,
    /// Best position this particle has visited.
    pub best_position: Vec<f64>,
}

impl Particle {
    /// Zero velocity; personal best starts at the agent's current position.
    #[must_use]
    pub fn new(agent: &Agent) -> Self {
        Self {
            velocity: vec![0.0; agent.dimension()],
            best_position: agent.position().to_vec(),
        }
    }
}

/// Bat extension: velocity only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bat {
    /// Current velocity, one entry per variable.
    pub velocity: Vec<f64>,
}

impl Bat {
    /// Zero velocity.
    #[must_use]
    pub fn new(agent: &Agent) -> Self {
        Self {
            velocity: vec![0.0; agent.dimension()],
        }
    }
}

/// Wrap every member of `population` addressed by `members` with an extension.
///
/// `decorated` is the algorithm's current list: decorating twice is refused,
/// as is an empty or out-of-range member list.
pub(crate) fn decorate<E>(
    algorithm: &'static str,
    decorated: &[Decorated<E>],
    population: &[Agent],
    members: &[usize],
    mut extend: impl FnMut(&Agent) -> E,
) -> Result<Vec<Decorated<E>>> {
    if !decorated.is_empty() {
        return Err(OptimizeError::AlreadyDecorated { algorithm });
    }
    if members.is_empty() {
        return Err(OptimizeError::empty_population(algorithm));
    }

    members
        .iter()
        .map(|&index| {
            let agent = population.get(index).ok_or(OptimizeError::AgentOutOfRange {
                index,
                len: population.len(),
            })?;
            Ok(Decorated::new(index, extend(agent)))
        })
        .collect()
}

/// Refuse to operate on an algorithm that owns no agents, or on a
/// population too short for the indices it was decorated with.
pub(crate) fn ensure_decorated<E>(
    algorithm: &'static str,
    decorated: &[Decorated<E>],
    agents: &[Agent],
) -> Result<()> {
    if decorated.is_empty() {
        return Err(OptimizeError::NotDecorated { algorithm });
    }
    match decorated.iter().map(Decorated::index).max() {
        Some(index) if index >= agents.len() => Err(OptimizeError::AgentOutOfRange {
            index,
            len: agents.len(),
        }),
        _ => Ok(()),
    }
}

/// Population indices of the decorated agents, in list order.
pub(crate) fn indices<E>(decorated: &[Decorated<E>]) -> Vec<usize> {
    decorated.iter().map(Decorated::index).collect()
}

/// Reorder `decorated` by ascending fitness of the wrapped agents. State
/// travels with its agent.
pub(crate) fn sort_by_fitness<E>(decorated: &mut [Decorated<E>], agents: &[Agent]) {
    decorated.sort_by(|a, b| a.agent(agents).compare(b.agent(agents)));
}

/// Clip every decorated agent to its bounds.
pub(crate) fn clip_all<E>(decorated: &[Decorated<E>], agents: &mut [Agent]) {
    for member in decorated {
        member.agent_mut(agents).clip();
    }
}
