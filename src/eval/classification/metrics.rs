//! Per-class precision, recall and F1

use super::average::Average;
use super::confusion::ConfusionMatrix;
use crate::error::Result;

/// Per-class classification metrics derived from a confusion matrix
#[derive(Clone, Debug)]
pub struct ClassMetrics {
    /// Per-class precision
    pub precision: Vec<f64>,
    /// Per-class recall
    pub recall: Vec<f64>,
    /// Per-class F1 score
    pub f1: Vec<f64>,
    /// Per-class true-label count
    pub support: Vec<usize>,
    /// Number of classes
    pub n_classes: usize,
}

impl ClassMetrics {
    /// Compute per-class metrics from a confusion matrix.
    ///
    /// Classes with no predicted (or no true) cells score 0 rather than NaN.
    pub fn from_confusion_matrix(cm: &ConfusionMatrix) -> Self {
        let n_classes = cm.n_classes();
        let mut precision = Vec::with_capacity(n_classes);
        let mut recall = Vec::with_capacity(n_classes);
        let mut f1 = Vec::with_capacity(n_classes);
        let mut support = Vec::with_capacity(n_classes);

        for class in 0..n_classes {
            let tp = cm.true_positives(class) as f64;
            let fp = cm.false_positives(class) as f64;
            let fng = cm.false_negatives(class) as f64;

            let p = if tp + fp > 0.0 { tp / (tp + fp) } else { 0.0 };
            let r = if tp + fng > 0.0 { tp / (tp + fng) } else { 0.0 };
            let f = if p + r > 0.0 {
                2.0 * p * r / (p + r)
            } else {
                0.0
            };

            precision.push(p);
            recall.push(r);
            f1.push(f);
            support.push(cm.support(class));
        }

        Self {
            precision,
            recall,
            f1,
            support,
            n_classes,
        }
    }

    /// Compute from label vectors
    pub fn from_labels(pred: &[usize], truth: &[usize], n_classes: Option<usize>) -> Result<Self> {
        let cm = ConfusionMatrix::from_labels(pred, truth, n_classes)?;
        Ok(Self::from_confusion_matrix(&cm))
    }

    /// Averaged precision
    pub fn precision_avg(&self, average: Average) -> f64 {
        self.reduce(&self.precision, average)
    }

    /// Averaged recall
    pub fn recall_avg(&self, average: Average) -> f64 {
        self.reduce(&self.recall, average)
    }

    /// Averaged F1
    pub fn f1_avg(&self, average: Average) -> f64 {
        self.reduce(&self.f1, average)
    }

    fn reduce(&self, values: &[f64], average: Average) -> f64 {
        match average {
            Average::Macro => {
                if values.is_empty() {
                    0.0
                } else {
                    values.iter().sum::<f64>() / values.len() as f64
                }
            }
            Average::Weighted => {
                let total: usize = self.support.iter().sum();
                if total == 0 {
                    return 0.0;
                }
                values
                    .iter()
                    .zip(self.support.iter())
                    .map(|(&v, &s)| v * s as f64)
                    .sum::<f64>()
                    / total as f64
            }
        }
    }
}
