//! Command-line interface for celda

mod args;
mod commands;
mod logging;

pub use args::{parse_args, AggregateArgs, Cli, Command, OutputFormat, ScoreArgs};
pub use commands::run_command;
pub use logging::LogLevel;
