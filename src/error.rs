//! Error types for metaswarm operations.
//!
//! Every configuration problem (bad bounds, unknown hyperparameter, empty
//! population) is reported eagerly at build or decorate time. Objective
//! failures are wrapped once and carry the original error as their source.

use thiserror::Error;

/// Boxed error returned by fallible objective functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for metaswarm operations.
///
/// # Examples
///
/// ```
/// use metaswarm::error::OptimizeError;
///
/// let err = OptimizeError::dimension_mismatch("bounds", 3, 2);
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Error, Debug)]
pub enum OptimizeError {
    /// A hyperparameter name that the algorithm does not declare.
    #[error("{algorithm}: unknown hyperparameter '{name}'")]
    UnknownHyperparameter {
        /// Algorithm short name (e.g. "PSO")
        algorithm: &'static str,
        /// Offending key
        name: String,
    },

    /// A declared hyperparameter received an out-of-domain value.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: f64,
        /// Constraint description
        constraint: String,
    },

    /// Vector lengths disagree.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Where the mismatch was detected
        context: String,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Lower bound above upper bound, or a non-finite bound.
    #[error("invalid bounds at variable {index}: lower {lower} must not exceed upper {upper}")]
    InvalidBounds {
        /// Decision variable index
        index: usize,
        /// Lower bound value
        lower: f64,
        /// Upper bound value
        upper: f64,
    },

    /// A population (or partition of one) with no agents.
    #[error("empty population: {context}")]
    EmptyPopulation {
        /// Where the empty population was found
        context: String,
    },

    /// A multi-algorithm run was started without any algorithm.
    #[error("no metaheuristics supplied to a multi-algorithm run")]
    NoMetaheuristics,

    /// `decorate` was called on an algorithm that already owns agents.
    #[error("{algorithm} is already decorated")]
    AlreadyDecorated {
        /// Algorithm short name
        algorithm: &'static str,
    },

    /// `evaluate`/`update` was called before `decorate`.
    #[error("{algorithm} has not been decorated with any agents")]
    NotDecorated {
        /// Algorithm short name
        algorithm: &'static str,
    },

    /// The search space was used before `build`.
    #[error("search space has not been built")]
    SpaceNotBuilt,

    /// A decorated index does not address an agent in the population.
    #[error("agent index {index} out of range for population of {len}")]
    AgentOutOfRange {
        /// Requested index
        index: usize,
        /// Population length
        len: usize,
    },

    /// The objective function reported a failure.
    #[error("objective function '{function}' failed: {source}")]
    Objective {
        /// Name of the failing function
        function: String,
        /// Original error
        #[source]
        source: BoxError,
    },
}

impl OptimizeError {
    /// Create a dimension mismatch error with descriptive context.
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            context: context.to_string(),
            expected,
            actual,
        }
    }

    /// Create an unknown hyperparameter error.
    #[must_use]
    pub fn unknown_hyperparameter(algorithm: &'static str, name: &str) -> Self {
        Self::UnknownHyperparameter {
            algorithm,
            name: name.to_string(),
        }
    }

    /// Create an empty population error.
    #[must_use]
    pub fn empty_population(context: &str) -> Self {
        Self::EmptyPopulation {
            context: context.to_string(),
        }
    }

    /// Create an invalid hyperparameter error.
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: f64, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value,
            constraint: constraint.to_string(),
        }
    }

    /// Whether this error is a configuration error (fatal at build/decorate time).
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::Objective { .. })
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, OptimizeError>;
