//! CLI argument parsing
//!
//! ```bash
//! # Score denoised expression against true counts
//! celda score denoising pred.json truth.json --mask mask.json
//!
//! # Score an annotation and emit JSON
//! celda score annotation pred_labels.json true_labels.json --format json
//!
//! # Average per-fold score files
//! celda aggregate fold0.json fold1.json fold2.json
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Celda: evaluation toolkit for single-cell models
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "celda")]
#[command(version)]
#[command(about = "Evaluation metrics for single-cell embedding, annotation, denoising and imputation models")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Score predictions against ground truth for one downstream task
    Score(ScoreArgs),

    /// Average per-fold score files into a single score map
    Aggregate(AggregateArgs),
}

/// Arguments for the score command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ScoreArgs {
    /// Task name: annotation, denoising, imputation or clustering
    #[arg(value_name = "TASK")]
    pub task: String,

    /// Predicted values: JSON label array or nested matrix
    #[arg(value_name = "PRED")]
    pub pred: PathBuf,

    /// True values: JSON label array or nested matrix
    #[arg(value_name = "TRUE")]
    pub truth: PathBuf,

    /// Boolean mask restricting scored entries (denoising)
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Explicit class count (annotation)
    #[arg(long)]
    pub num_classes: Option<usize>,

    /// Score imputation per cell instead of per gene
    #[arg(long)]
    pub per_cell: bool,

    /// Skip library-size normalization (denoising)
    #[arg(long)]
    pub no_normalize: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the aggregate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct AggregateArgs {
    /// Per-fold score files (JSON objects of metric name to value)
    #[arg(value_name = "FOLD", required = true)]
    pub folds: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Output rendering for score maps
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// Pretty-printed JSON object
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {s}. Valid formats: text, json")),
        }
    }
}

/// Parse CLI arguments from an iterator (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
