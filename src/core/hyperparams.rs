//! Named hyperparameter maps.
//!
//! Algorithms declare a closed set of tunable fields. A [`Hyperparameters`]
//! map is matched against that set by name at construction time; any key the
//! algorithm does not declare is a configuration error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{OptimizeError, Result};

/// Ordered `name -> value` map of hyperparameters.
///
/// # Example
///
/// ```
/// use metaswarm::core::Hyperparameters;
///
/// let params = Hyperparameters::new().with("w", 0.5).with("c1", 2.0);
/// assert_eq!(params.get("w"), Some(0.5));
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hyperparameters(BTreeMap<String, f64>);

impl Hyperparameters {
    /// Empty map; algorithms fall back to their defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one entry.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    /// Add or replace one entry in place.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    /// Look up one entry.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Hyperparameters {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Convert a float hyperparameter into a count, rejecting fractions and
/// values below `min`.
pub(crate) fn as_count(param: &str, value: f64, min: usize) -> Result<usize> {
    if !value.is_finite() || value.fract() != 0.0 || value < min as f64 {
        return Err(OptimizeError::invalid_hyperparameter(
            param,
            value,
            &format!("an integer >= {min}"),
        ));
    }
    Ok(value as usize)
}

/// Reject non-finite values.
pub(crate) fn as_finite(param: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OptimizeError::invalid_hyperparameter(
            param,
            value,
            "a finite number",
        ))
    }
}

/// Reject values outside `[0, 1]`.
pub(crate) fn as_probability(param: &str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(OptimizeError::invalid_hyperparameter(
            param,
            value,
            "a probability in [0, 1]",
        ))
    }
}
