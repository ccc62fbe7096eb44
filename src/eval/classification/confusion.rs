//! Confusion matrix for multi-class label comparison

use crate::error::{Error, Result};
use std::fmt;

/// Row-major confusion matrix.
///
/// Entry `(i, j)` counts cells whose true label is `i` and predicted label
/// is `j`.
#[derive(Clone, Debug)]
pub struct ConfusionMatrix {
    counts: Vec<usize>,
    n_classes: usize,
}

impl ConfusionMatrix {
    /// Build from predicted and true label vectors.
    ///
    /// The class count is inferred as `max label + 1` when not given.
    /// Labels at or above an explicit class count are rejected.
    pub fn from_labels(
        pred: &[usize],
        truth: &[usize],
        n_classes: Option<usize>,
    ) -> Result<Self> {
        if pred.len() != truth.len() {
            return Err(Error::InvalidParameter(format!(
                "predicted has {} labels but true has {}",
                pred.len(),
                truth.len()
            )));
        }
        if pred.is_empty() {
            return Err(Error::InvalidParameter("empty label vectors".to_string()));
        }

        let max_label = pred.iter().chain(truth.iter()).copied().max().unwrap_or(0);
        let nc = match n_classes {
            Some(nc) if max_label >= nc => {
                return Err(Error::InvalidParameter(format!(
                    "label {max_label} out of range for {nc} classes"
                )));
            }
            Some(nc) => nc,
            None => max_label + 1,
        };

        let mut counts = vec![0usize; nc * nc];
        for (&p, &t) in pred.iter().zip(truth.iter()) {
            counts[t * nc + p] += 1;
        }

        Ok(Self {
            counts,
            n_classes: nc,
        })
    }

    /// Number of classes
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Count at (true label, predicted label)
    pub fn get(&self, truth: usize, pred: usize) -> usize {
        self.counts[truth * self.n_classes + pred]
    }

    /// Cells of `class` predicted as `class`
    pub fn true_positives(&self, class: usize) -> usize {
        self.get(class, class)
    }

    /// Cells of other classes predicted as `class`
    pub fn false_positives(&self, class: usize) -> usize {
        (0..self.n_classes)
            .filter(|&t| t != class)
            .map(|t| self.get(t, class))
            .sum()
    }

    /// Cells of `class` predicted as something else
    pub fn false_negatives(&self, class: usize) -> usize {
        (0..self.n_classes)
            .filter(|&p| p != class)
            .map(|p| self.get(class, p))
            .sum()
    }

    /// Number of cells whose true label is `class`
    pub fn support(&self, class: usize) -> usize {
        (0..self.n_classes).map(|p| self.get(class, p)).sum()
    }

    /// Total number of cells
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Overall fraction of correctly predicted cells
    pub fn overall_accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.n_classes).map(|c| self.get(c, c)).sum();
        correct as f64 / total as f64
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "      ")?;
        for p in 0..self.n_classes {
            write!(f, "pred {p} ")?;
        }
        writeln!(f)?;
        for t in 0..self.n_classes {
            write!(f, "true {t}")?;
            for p in 0..self.n_classes {
                write!(f, "{:>6} ", self.get(t, p))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
