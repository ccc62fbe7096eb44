//! Celda CLI
//!
//! Entry point for scoring single-cell model predictions and aggregating
//! per-fold results.
//!
//! ```bash
//! celda score annotation pred_labels.json true_labels.json
//! celda score denoising pred.json truth.json --mask mask.json
//! celda aggregate fold0.json fold1.json fold2.json
//! ```

use celda::cli::{run_command, Cli};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
