// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;
pub mod output;
pub mod types;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{debug, info};

use crate::cli::{CliArgs, OutputFormat};
use crate::config::loader::load_and_validate;
use crate::config::model::PlanFile;
use crate::dag::{ScheduleOptions, Scheduler};

pub use crate::dag::{ScheduleReport, TaskDescriptor, schedule};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - plan loading and validation
/// - option layering (CLI flags over `[config]`)
/// - the scheduler
/// - rendering to stdout
pub fn run(args: CliArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_to(args, &mut out)
}

/// Same as [`run`], but renders the plan or schedule into `out`.
pub fn run_to(args: CliArgs, out: &mut impl Write) -> Result<()> {
    let plan_path = PathBuf::from(&args.plan);
    let plan = load_and_validate(&plan_path)
        .with_context(|| format!("loading plan file {}", plan_path.display()))?;

    let options = effective_options(&plan, &args);
    debug!(?options, "effective scheduler options");

    if args.dry_run {
        output::write_plan(out, &plan, &options)?;
        debug!("dry-run complete (nothing scheduled)");
        return Ok(());
    }

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    info!(%today, tasks = plan.tasks.len(), "scheduling plan");

    let scheduler = Scheduler::new(options).context("invalid scheduler options")?;
    let report = scheduler.schedule(&plan.descriptors(), today)?;

    match args.format {
        OutputFormat::Text => output::write_text(out, &plan, &report, today)?,
        OutputFormat::Json => {
            output::write_json(out, &plan, scheduler.options(), &report, today)?
        }
    }
    out.flush()?;

    Ok(())
}

/// Plan `[config]` values with any CLI overrides applied on top.
pub fn effective_options(plan: &PlanFile, args: &CliArgs) -> ScheduleOptions {
    let mut options = plan.schedule_options();

    if let Some(hours) = args.hours_per_day {
        options.hours_per_day = hours;
    }
    if let Some(rounds) = args.max_rounds {
        options.max_rounds = rounds;
    }
    if let Some(strategy) = args.strategy {
        options.strategy = strategy;
    }
    if let Some(policy) = args.missing_deps {
        options.missing_dependencies = policy;
    }

    options
}
