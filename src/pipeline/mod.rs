//! Experiment driver around an external model pipeline
//!
//! The trained model is an opaque collaborator exposing `fit`, `predict` and
//! `score`; this module wires one training-and-evaluation run around it:
//! split assignment, fitting, embedding prediction into the container, and
//! scoring.

mod experiment;


pub use experiment::{evaluate_cv, run_experiment, ExperimentConfig, ExperimentReport};

use crate::data::CellData;
use crate::error::Result;
use crate::eval::Scores;
use ndarray::Array2;

/// A trained (or trainable) model pipeline.
///
/// Implementations wrap external pretrained-model libraries; no contract is
/// assumed beyond the stated shapes.
pub trait Pipeline {
    /// Fit on the cells whose split column marks them as training/validation
    fn fit(&mut self, data: &CellData, config: &ExperimentConfig) -> Result<()>;

    /// Produce a cells x dims embedding for every cell in the container
    fn predict(&self, data: &CellData) -> Result<Array2<f64>>;

    /// Score the fitted pipeline against the labels in `label_field`
    fn score(&self, data: &CellData, label_field: &str) -> Result<Scores>;
}
