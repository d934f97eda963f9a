//! Vector and random-number helpers shared by the update rules.

pub mod distance;
pub mod stochastic;
pub mod vector;

pub use distance::euclidean;
pub use vector::subtract;
