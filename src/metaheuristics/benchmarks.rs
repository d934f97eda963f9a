//! Benchmark functions for metaheuristic evaluation.
//!
//! Plain `&[f64] -> f64` test landscapes. Wrap one in a
//! [`Function`](crate::core::Function) to hand it to a search space.
//!
//! All functions have their global minimum at f(x*) = 0.
//!
//! # References
//!
//! - Jamil & Yang (2013): "A Literature Survey of Benchmark Functions For
//!   Global Optimization Problems"
//! - Liang et al. (2013): "Problem Definitions and Evaluation Criteria for the
//!   CEC 2013 Special Session on Real-Parameter Optimization"

use std::f64::consts::{E, PI};

/// Sphere function - Unimodal, separable
///
/// Global minimum: f(0, 0, ..., 0) = 0
/// Search domain: [-100, 100]^D
///
/// # Example
/// ```
/// use metaswarm::metaheuristics::benchmarks::sphere;
/// assert!((sphere(&[0.0, 0.0, 0.0])).abs() < 1e-10);
/// ```
#[must_use]
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|xi| xi * xi).sum()
}

/// Rosenbrock function - Unimodal, non-separable
///
/// Global minimum: f(1, 1, ..., 1) = 0
/// Search domain: [-30, 30]^D
///
/// # Example
/// ```
/// use metaswarm::metaheuristics::benchmarks::rosenbrock;
/// assert!((rosenbrock(&[1.0, 1.0, 1.0])).abs() < 1e-10);
/// ```
#[must_use]
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
        .sum()
}

/// Rastrigin function - Multimodal, separable
///
/// Global minimum: f(0, 0, ..., 0) = 0
/// Search domain: [-5.12, 5.12]^D
///
/// # Example
/// ```
/// use metaswarm::metaheuristics::benchmarks::rastrigin;
/// assert!((rastrigin(&[0.0, 0.0])).abs() < 1e-10);
/// ```
#[must_use]
pub fn rastrigin(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    10.0 * n
        + x.iter()
            .map(|xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
            .sum::<f64>()
}

/// Ackley's first function - Multimodal, non-separable
///
/// Global minimum: f(0, 0, ..., 0) = 0
/// Search domain: [-35, 35]^D
///
/// Returns 0 for an empty input.
///
/// # Example
/// ```
/// use metaswarm::metaheuristics::benchmarks::ackley1;
/// assert!(ackley1(&[0.0, 0.0]).abs() < 1e-10);
/// ```
#[must_use]
pub fn ackley1(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    let n = x.len() as f64;
    let sum_sq: f64 = x.iter().map(|xi| xi * xi).sum();
    let sum_cos: f64 = x.iter().map(|xi| (2.0 * PI * xi).cos()).sum();

    -20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + 20.0 + E
}

/// Griewank function - Multimodal, non-separable
///
/// Global minimum: f(0, 0, ..., 0) = 0
/// Search domain: [-600, 600]^D
///
/// # Example
/// ```
/// use metaswarm::metaheuristics::benchmarks::griewank;
/// assert!(griewank(&[0.0; 4]).abs() < 1e-10);
/// ```
#[must_use]
pub fn griewank(x: &[f64]) -> f64 {
    let sum: f64 = x.iter().map(|xi| xi * xi).sum::<f64>() / 4000.0;
    let prod: f64 = x
        .iter()
        .enumerate()
        .map(|(i, xi)| (xi / ((i + 1) as f64).sqrt()).cos())
        .product();
    sum - prod + 1.0
}

/// Alpine's first function - Multimodal, non-separable
///
/// Global minimum: f(0, 0, ..., 0) = 0
/// Search domain: [-10, 10]^D
///
/// # Example
/// ```
/// use metaswarm::metaheuristics::benchmarks::alpine1;
/// assert!(alpine1(&[0.0, 0.0]).abs() < 1e-10);
/// ```
#[must_use]
pub fn alpine1(x: &[f64]) -> f64 {
    x.iter().map(|xi| (xi * xi.sin() + 0.1 * xi).abs()).sum()
}

/// Salomon function - Multimodal, non-separable
///
/// Global minimum: f(0, 0, ..., 0) = 0
/// Search domain: [-100, 100]^D
///
/// The landscape only depends on the distance to the origin, so its local
/// minima form concentric rings.
///
/// # Example
/// ```
/// use metaswarm::metaheuristics::benchmarks::salomon;
/// assert!(salomon(&[0.0, 0.0]).abs() < 1e-10);
/// ```
#[must_use]
pub fn salomon(x: &[f64]) -> f64 {
    let norm = sphere(x).sqrt();
    1.0 - (2.0 * PI * norm).cos() + 0.1 * norm
}

/// Quartic function - Unimodal, separable
///
/// Global minimum: f(0, 0, ..., 0) = 0
/// Search domain: [-1.28, 1.28]^D
///
/// The usual uniform noise term is left out so runs stay reproducible.
///
/// # Example
/// ```
/// use metaswarm::metaheuristics::benchmarks::quartic;
/// assert!((quartic(&[1.0, 1.0]) - 3.0).abs() < 1e-10);
/// ```
#[must_use]
pub fn quartic(x: &[f64]) -> f64 {
    x.iter()
        .enumerate()
        .map(|(i, xi)| (i + 1) as f64 * xi.powi(4))
        .sum()
}

/// Rotated hyper-ellipsoid function - Unimodal, convex
///
/// Global minimum: f(0, 0, ..., 0) = 0
/// Search domain: [-65.536, 65.536]^D
///
/// f(x) = Σ_i Σ_{j≤i} x_j²
///
/// # Example
/// ```
/// use metaswarm::metaheuristics::benchmarks::rotated_hyper_ellipsoid;
/// // 1 + (1 + 4) = 6
/// assert!((rotated_hyper_ellipsoid(&[1.0, 2.0]) - 6.0).abs() < 1e-10);
/// ```
#[must_use]
pub fn rotated_hyper_ellipsoid(x: &[f64]) -> f64 {
    let n = x.len();
    x.iter()
        .enumerate()
        .map(|(i, xi)| (n - i) as f64 * xi * xi)
        .sum()
}

/// High-conditioned elliptic function - Unimodal, non-separable
///
/// Global minimum: f(0, 0, ..., 0) = 0
/// Search domain: [-100, 100]^D
///
/// Condition number 10^6 between the first and the last variable.
///
/// # Example
/// ```
/// use metaswarm::metaheuristics::benchmarks::high_conditioned_elliptic;
/// assert!((high_conditioned_elliptic(&[1.0, 1.0]) - 1_000_001.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn high_conditioned_elliptic(x: &[f64]) -> f64 {
    let span = x.len().saturating_sub(1).max(1) as f64;
    x.iter()
        .enumerate()
        .map(|(i, xi)| 1e6_f64.powf(i as f64 / span) * xi * xi)
        .sum()
}

/// Benchmark function metadata
#[derive(Debug, Clone)]
pub struct BenchmarkInfo {
    /// Function name
    pub name: &'static str,
    /// The function itself
    pub function: fn(&[f64]) -> f64,
    /// Is multimodal (multiple local minima)
    pub multimodal: bool,
    /// Is separable (can optimize each dimension independently)
    pub separable: bool,
    /// Recommended search bounds [lower, upper]
    pub bounds: (f64, f64),
    /// Global optimum value
    pub optimum: f64,
}

/// Get metadata for all benchmark functions
#[must_use]
pub fn all_benchmarks() -> Vec<BenchmarkInfo> {
    vec![
        BenchmarkInfo {
            name: "Sphere",
            function: sphere,
            multimodal: false,
            separable: true,
            bounds: (-100.0, 100.0),
            optimum: 0.0,
        },
        BenchmarkInfo {
            name: "Rosenbrock",
            function: rosenbrock,
            multimodal: false,
            separable: false,
            bounds: (-30.0, 30.0),
            optimum: 0.0,
        },
        BenchmarkInfo {
            name: "Rastrigin",
            function: rastrigin,
            multimodal: true,
            separable: true,
            bounds: (-5.12, 5.12),
            optimum: 0.0,
        },
        BenchmarkInfo {
            name: "Ackley1",
            function: ackley1,
            multimodal: true,
            separable: false,
            bounds: (-35.0, 35.0),
            optimum: 0.0,
        },
        BenchmarkInfo {
            name: "Griewank",
            function: griewank,
            multimodal: true,
            separable: false,
            bounds: (-600.0, 600.0),
            optimum: 0.0,
        },
        BenchmarkInfo {
            name: "Alpine1",
            function: alpine1,
            multimodal: true,
            separable: false,
            bounds: (-10.0, 10.0),
            optimum: 0.0,
        },
        BenchmarkInfo {
            name: "Salomon",
            function: salomon,
            multimodal: true,
            separable: false,
            bounds: (-100.0, 100.0),
            optimum: 0.0,
        },
        BenchmarkInfo {
            name: "Quartic",
            function: quartic,
            multimodal: false,
            separable: true,
            bounds: (-1.28, 1.28),
            optimum: 0.0,
        },
        BenchmarkInfo {
            name: "RotatedHyperEllipsoid",
            function: rotated_hyper_ellipsoid,
            multimodal: false,
            separable: true,
            bounds: (-65.536, 65.536),
            optimum: 0.0,
        },
        BenchmarkInfo {
            name: "HighConditionedElliptic",
            function: high_conditioned_elliptic,
            multimodal: false,
            separable: false,
            bounds: (-100.0, 100.0),
            optimum: 0.0,
        },
    ]
}

#[cfg(test)]
#[path = "benchmarks_tests.rs"]
mod tests;
