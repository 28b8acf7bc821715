// src/cli.rs

//! CLI argument parsing using `clap`.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use crate::types::{MissingDependencies, Strategy};

/// Command-line arguments for `duedag`.
///
/// Scheduler flags override the plan file's `[config]` section.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "duedag",
    version,
    about = "Compute task due dates from effort estimates and dependencies.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the plan file (TOML).
    ///
    /// Default: `Tasks.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Tasks.toml")]
    pub plan: String,

    /// Schedule origin as YYYY-MM-DD. Defaults to the local date.
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Working hours per calendar day.
    #[arg(long, value_name = "HOURS")]
    pub hours_per_day: Option<f64>,

    /// Round budget of the relaxation strategy.
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<usize>,

    /// Propagation strategy (relaxation, topological).
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<Strategy>,

    /// Policy for dependency ids that name no task (block, ignore).
    #[arg(long = "missing-deps", value_name = "POLICY")]
    pub missing_deps: Option<MissingDependencies>,

    /// Output format for the schedule.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DUEDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the plan, but don't schedule anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
