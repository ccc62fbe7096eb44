//! Single training-and-evaluation experiment run

use super::Pipeline;
use crate::data::{assign_splits, CellData, KFold, SplitFractions};
use crate::error::{Error, Result};
use crate::eval::{aggregate_scores, Scores};
use std::fmt;
use std::time::Instant;

/// Configuration for one experiment run
#[derive(Clone, Debug)]
pub struct ExperimentConfig {
    /// Annotation column holding true cell labels
    pub label_field: String,
    /// Annotation column holding split membership
    pub split_field: String,
    /// Embedding slot the prediction is written into
    pub embedding_key: String,
    /// Seed for split assignment
    pub seed: u64,
    /// Validation and test fractions
    pub fractions: SplitFractions,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            label_field: "celltype".to_string(),
            split_field: "split".to_string(),
            embedding_key: "emb".to_string(),
            seed: 42,
            fractions: SplitFractions::default(),
        }
    }
}

/// Outcome of one experiment run
#[derive(Clone, Debug)]
pub struct ExperimentReport {
    /// Scores returned by the pipeline
    pub scores: Scores,
    /// Cells in the container
    pub n_cells: usize,
    /// Genes in the container
    pub n_genes: usize,
    /// Width of the predicted embedding
    pub embedding_dims: usize,
    /// Wall-clock time of the whole run
    pub elapsed_ms: f64,
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "experiment: {} cells x {} genes, {}-dim embedding",
            self.n_cells, self.n_genes, self.embedding_dims
        )?;
        writeln!(f, "scores:")?;
        write!(f, "{}", self.scores)?;
        writeln!(f, "elapsed: {:.2}ms", self.elapsed_ms)
    }
}

/// Run one experiment: assign splits (unless the split column already
/// exists), fit the pipeline, predict the embedding into the container, and
/// score against the label field.
pub fn run_experiment<P: Pipeline>(
    pipeline: &mut P,
    data: &mut CellData,
    config: &ExperimentConfig,
) -> Result<ExperimentReport> {
    let start = Instant::now();

    if data.obs(&config.split_field).is_none() {
        assign_splits(data, &config.split_field, config.fractions, config.seed)?;
    }
    if data.obs(&config.label_field).is_none() {
        return Err(Error::FieldNotFound(config.label_field.clone()));
    }

    pipeline.fit(data, config)?;

    let embedding = pipeline.predict(data)?;
    if embedding.nrows() != data.n_cells() {
        return Err(Error::shape(
            (data.n_cells(), embedding.ncols()),
            embedding.dim(),
        ));
    }
    let embedding_dims = embedding.ncols();
    data.insert_obsm(config.embedding_key.clone(), embedding)?;

    let scores = pipeline.score(data, &config.label_field)?;

    Ok(ExperimentReport {
        scores,
        n_cells: data.n_cells(),
        n_genes: data.n_genes(),
        embedding_dims,
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    })
}

/// Cross-validated evaluation: run `eval_fn` on each train/test index pair
/// from a seeded k-fold split and average the per-fold score maps.
pub fn evaluate_cv<F>(n_samples: usize, folds: usize, seed: u64, eval_fn: F) -> Result<Scores>
where
    F: Fn(&[usize], &[usize]) -> Result<Scores>,
{
    let kfold = KFold::new(folds).with_seed(seed);
    let mut per_fold = Vec::with_capacity(folds);
    for (train_idx, test_idx) in kfold.split(n_samples)? {
        per_fold.push(eval_fn(&train_idx, &test_idx)?);
    }
    aggregate_scores(&per_fold)
}
