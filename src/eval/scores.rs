//! Named metric scores and cross-fold aggregation

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered map of metric name to value produced by one evaluation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scores(BTreeMap<String, f64>);

impl Scores {
    /// Create an empty score map
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a metric value
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    /// Get a metric value by name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Iterate over (name, value) pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Metric names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of metrics
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no metrics have been recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for Scores {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Scores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.0 {
            writeln!(f, "  {name}: {value:.4}")?;
        }
        Ok(())
    }
}

/// Average per-fold score maps into a single map.
///
/// The key set is taken from the first fold; every fold must report a value
/// for every key. A single-element input comes back unchanged.
pub fn aggregate_scores(folds: &[Scores]) -> Result<Scores> {
    let first = folds
        .first()
        .ok_or_else(|| Error::InvalidParameter("cannot aggregate zero folds".to_string()))?;

    let mut out = Scores::new();
    for name in first.names() {
        let mut total = 0.0;
        for (i, fold) in folds.iter().enumerate() {
            total += fold.get(name).ok_or_else(|| {
                Error::InvalidParameter(format!("fold {i} is missing metric '{name}'"))
            })?;
        }
        out.insert(name, total / folds.len() as f64);
    }
    Ok(out)
}
