//! CLI command handlers

use super::args::{AggregateArgs, Cli, Command, OutputFormat, ScoreArgs};
use super::logging::{log, LogLevel};
use crate::error::{Error, Result};
use crate::eval::{aggregate_scores, downstream_eval, EvalInput, ScoreAxis, Scores, Task};
use ndarray::Array2;
use std::fs;
use std::path::Path;

/// Execute a parsed CLI invocation
pub fn run_command(cli: Cli) -> Result<()> {
    let level = LogLevel::from_flags(cli.verbose, cli.quiet);
    match cli.command {
        Command::Score(args) => run_score(&args, level),
        Command::Aggregate(args) => run_aggregate(&args, level),
    }
}

fn run_score(args: &ScoreArgs, level: LogLevel) -> Result<()> {
    let task: Task = args.task.parse()?;

    let mut input = EvalInput::new();
    match task {
        Task::Annotation | Task::Clustering => {
            let pred = load_labels(&args.pred)?;
            let truth = load_labels(&args.truth)?;
            log(
                level,
                LogLevel::Verbose,
                &format!("loaded {} predicted and {} true labels", pred.len(), truth.len()),
            );
            input = input.with_labels(pred, truth);
            if let Some(nc) = args.num_classes {
                input = input.with_num_classes(nc);
            }
        }
        // Disabled task: fail before touching any input files
        Task::PerturbationPrediction => return downstream_eval(task, &input).map(drop),
        Task::Denoising | Task::Imputation => {
            let pred = load_matrix(&args.pred)?;
            let truth = load_matrix(&args.truth)?;
            log(
                level,
                LogLevel::Verbose,
                &format!("loaded {}x{} matrices", truth.nrows(), truth.ncols()),
            );
            input = input.with_matrices(pred, truth);
            if let Some(path) = &args.mask {
                input = input.with_mask(load_mask(path)?);
            }
            if args.per_cell {
                input = input.with_axis(ScoreAxis::Cell);
            }
            if args.no_normalize {
                input = input.without_normalize();
            }
        }
    }

    let scores = downstream_eval(task, &input)?;
    print_scores(&scores, args.format, level);
    Ok(())
}

fn run_aggregate(args: &AggregateArgs, level: LogLevel) -> Result<()> {
    let mut folds = Vec::with_capacity(args.folds.len());
    for path in &args.folds {
        let text = fs::read_to_string(path)?;
        folds.push(serde_json::from_str::<Scores>(&text)?);
    }
    log(
        level,
        LogLevel::Verbose,
        &format!("aggregating {} folds", folds.len()),
    );
    let agg = aggregate_scores(&folds)?;
    print_scores(&agg, args.format, level);
    Ok(())
}

fn print_scores(scores: &Scores, format: OutputFormat, level: LogLevel) {
    match format {
        OutputFormat::Text => {
            for (name, value) in scores.iter() {
                log(level, LogLevel::Normal, &format!("{name}: {value:.4}"));
            }
        }
        OutputFormat::Json => {
            // Serializing a name->f64 map cannot fail
            let json = serde_json::to_string_pretty(scores).unwrap_or_default();
            log(level, LogLevel::Normal, &json);
        }
    }
}

fn load_labels(path: &Path) -> Result<Vec<usize>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn load_matrix(path: &Path) -> Result<Array2<f64>> {
    let text = fs::read_to_string(path)?;
    let rows: Vec<Vec<f64>> = serde_json::from_str(&text)?;
    rows_to_array(rows, path)
}

fn load_mask(path: &Path) -> Result<Array2<bool>> {
    let text = fs::read_to_string(path)?;
    let rows: Vec<Vec<bool>> = serde_json::from_str(&text)?;
    rows_to_array(rows, path)
}

fn rows_to_array<T: Clone>(rows: Vec<Vec<T>>, path: &Path) -> Result<Array2<T>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != n_cols) {
        return Err(Error::InvalidParameter(format!(
            "ragged matrix in {}",
            path.display()
        )));
    }
    let flat: Vec<T> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat).map_err(|e| {
        Error::InvalidParameter(format!("bad matrix in {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_labels() {
        let file = write_json("[0, 1, 2, 1]");
        assert_eq!(load_labels(file.path()).unwrap(), vec![0, 1, 2, 1]);
    }

    #[test]
    fn test_load_matrix() {
        let file = write_json("[[1.0, 2.0], [3.0, 4.0]]");
        let m = load_matrix(file.path()).unwrap();
        assert_eq!(m.dim(), (2, 2));
        assert_eq!(m[[1, 0]], 3.0);
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        let file = write_json("[[1.0, 2.0], [3.0]]");
        assert!(load_matrix(file.path()).is_err());
    }

    #[test]
    fn test_score_command_end_to_end() {
        let pred = write_json("[0, 1, 1, 0]");
        let truth = write_json("[0, 1, 1, 0]");
        let cli = super::super::args::parse_args([
            "celda",
            "--quiet",
            "score",
            "annotation",
            pred.path().to_str().unwrap(),
            truth.path().to_str().unwrap(),
        ])
        .unwrap();
        assert!(run_command(cli).is_ok());
    }

    #[test]
    fn test_score_unknown_task_fails() {
        let pred = write_json("[0]");
        let truth = write_json("[0]");
        let cli = super::super::args::parse_args([
            "celda",
            "score",
            "embedding",
            pred.path().to_str().unwrap(),
            truth.path().to_str().unwrap(),
        ])
        .unwrap();
        let err = run_command(cli).unwrap_err();
        assert!(matches!(err, Error::UnsupportedTask(_)));
    }

    #[test]
    fn test_aggregate_command_end_to_end() {
        let a = write_json("{\"ari\": 0.4, \"nmi\": 0.6}");
        let b = write_json("{\"ari\": 0.6, \"nmi\": 0.8}");
        let cli = super::super::args::parse_args([
            "celda",
            "--quiet",
            "aggregate",
            a.path().to_str().unwrap(),
            b.path().to_str().unwrap(),
        ])
        .unwrap();
        assert!(run_command(cli).is_ok());
    }
}
