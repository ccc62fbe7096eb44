//! Downstream evaluation for single-cell models
//!
//! A task dispatcher routes each downstream task to its statistical
//! comparison routine between predicted and true per-cell / per-gene values:
//!
//! - `annotation`: multi-class cell type metrics via confusion matrix
//! - `denoising`: Pearson / cosine / MSE family over expression matrices
//! - `imputation`: per-gene (or per-cell) error and correlation means
//! - `clustering`: ARI / NMI agreement between label assignments
//!
//! Per-fold results come back as [`Scores`] maps and are averaged across
//! folds with [`aggregate_scores`].

pub mod annotation;
pub mod classification;
pub mod clustering;
pub mod denoising;
pub mod imputation;
pub mod scores;
pub mod stats;
pub mod task;


pub use annotation::annotation_eval;
pub use classification::{classification_report, Average, ClassMetrics, ConfusionMatrix};
pub use clustering::{adjusted_rand_index, clustering_eval, normalized_mutual_info};
pub use denoising::denoising_eval;
pub use imputation::{imputation_eval, ScoreAxis};
pub use scores::{aggregate_scores, Scores};
pub use task::Task;

use crate::error::{Error, Result};
use ndarray::Array2;

/// Inputs for a downstream evaluation.
///
/// Tasks consume different subsets of these fields; the dispatcher rejects a
/// call whose task is missing its inputs. Count normalization defaults to on
/// for denoising.
#[derive(Clone, Debug)]
pub struct EvalInput {
    /// Predicted expression matrix (cells x genes)
    pub pred: Option<Array2<f64>>,
    /// True expression matrix (cells x genes)
    pub truth: Option<Array2<f64>>,
    /// Predicted per-cell labels (annotation) or cluster ids (clustering)
    pub pred_labels: Option<Vec<usize>>,
    /// True per-cell labels
    pub true_labels: Option<Vec<usize>>,
    /// Boolean mask restricting which entries are scored (denoising)
    pub mask: Option<Array2<bool>>,
    /// Explicit class count for annotation
    pub num_classes: Option<usize>,
    /// Imputation scoring axis
    pub axis: ScoreAxis,
    /// Apply library-size normalization before denoising metrics
    pub normalize: bool,
}

impl Default for EvalInput {
    fn default() -> Self {
        Self {
            pred: None,
            truth: None,
            pred_labels: None,
            true_labels: None,
            mask: None,
            num_classes: None,
            axis: ScoreAxis::default(),
            normalize: true,
        }
    }
}

impl EvalInput {
    /// Empty input with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set predicted and true expression matrices
    pub fn with_matrices(mut self, pred: Array2<f64>, truth: Array2<f64>) -> Self {
        self.pred = Some(pred);
        self.truth = Some(truth);
        self
    }

    /// Set predicted and true label vectors
    pub fn with_labels(mut self, pred: Vec<usize>, truth: Vec<usize>) -> Self {
        self.pred_labels = Some(pred);
        self.true_labels = Some(truth);
        self
    }

    /// Set the evaluation mask
    pub fn with_mask(mut self, mask: Array2<bool>) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Set an explicit class count
    pub fn with_num_classes(mut self, num_classes: usize) -> Self {
        self.num_classes = Some(num_classes);
        self
    }

    /// Set the imputation scoring axis
    pub fn with_axis(mut self, axis: ScoreAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Disable count normalization for denoising
    pub fn without_normalize(mut self) -> Self {
        self.normalize = false;
        self
    }

    fn labels(&self, task: Task) -> Result<(&[usize], &[usize])> {
        match (&self.pred_labels, &self.true_labels) {
            (Some(p), Some(t)) => Ok((p, t)),
            _ => Err(Error::InvalidParameter(format!(
                "{task} evaluation needs predicted and true labels"
            ))),
        }
    }

    fn matrices(&self, task: Task) -> Result<(&Array2<f64>, &Array2<f64>)> {
        match (&self.pred, &self.truth) {
            (Some(p), Some(t)) => Ok((p, t)),
            _ => Err(Error::InvalidParameter(format!(
                "{task} evaluation needs predicted and true matrices"
            ))),
        }
    }
}

/// Route a downstream task to its evaluation routine.
///
/// Perturbation prediction is disabled and always fails; see the release
/// notes of the upstream model library.
pub fn downstream_eval(task: Task, input: &EvalInput) -> Result<Scores> {
    match task {
        Task::Annotation => {
            let (pred, truth) = input.labels(task)?;
            annotation_eval(pred, truth, input.num_classes)
        }
        Task::Denoising => {
            let (pred, truth) = input.matrices(task)?;
            denoising_eval(pred.view(), truth.view(), input.mask.as_ref(), input.normalize)
        }
        Task::Imputation => {
            let (pred, truth) = input.matrices(task)?;
            imputation_eval(pred.view(), truth.view(), input.axis)
        }
        Task::Clustering => {
            let (pred, truth) = input.labels(task)?;
            clustering_eval(pred, truth)
        }
        Task::PerturbationPrediction => Err(Error::TaskDisabled(
            "perturbation prediction evaluation is removed from the current release",
        )),
    }
}
