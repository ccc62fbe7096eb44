//! Celda: evaluation toolkit for single-cell genomic models
//!
//! Computes downstream evaluation metrics for single-cell embedding,
//! annotation, denoising and imputation models, and drives a single
//! training-and-evaluation experiment around an external model pipeline.
//!
//! ## Architecture
//!
//! - [`eval`]: task dispatcher, statistical comparison routines, fold
//!   aggregation
//! - [`data`]: AnnData-like in-memory container and split utilities
//! - [`pipeline`]: experiment driver over an opaque `fit`/`predict`/`score`
//!   model pipeline
//! - [`cli`]: the `celda` command-line tool
//!
//! ## Example
//!
//! ```
//! use celda::eval::{downstream_eval, EvalInput, Task};
//!
//! let input = EvalInput::new().with_labels(vec![0, 1, 2], vec![0, 1, 2]);
//! let scores = downstream_eval(Task::Annotation, &input)?;
//! assert_eq!(scores.get("acc"), Some(1.0));
//! # Ok::<(), celda::error::Error>(())
//! ```

pub mod cli;
pub mod data;
pub mod error;
pub mod eval;
pub mod pipeline;

pub use data::{CellData, KFold, SplitFractions};
pub use error::{Error, Result};
pub use eval::{aggregate_scores, downstream_eval, EvalInput, Scores, Task};
pub use pipeline::{run_experiment, ExperimentConfig, ExperimentReport, Pipeline};
