// src/output.rs

//! Rendering of plans and schedules for the CLI.
//!
//! Every renderer writes to an `io::Write` so tests can capture output in a
//! `Vec<u8>` while the binary passes a locked stdout.

use std::io::{self, Write};

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{PlanFile, TaskConfig};
use crate::dag::{
    ScheduleOptions, ScheduleReport, ScheduleSummary, UnresolvedReason, UnresolvedTask,
};

/// Dry-run output: tasks, dependencies and the options that would be used.
pub fn write_plan(
    out: &mut impl Write,
    plan: &PlanFile,
    options: &ScheduleOptions,
) -> io::Result<()> {
    writeln!(out, "duedag dry-run")?;
    writeln!(out, "  config.hours_per_day = {}", options.hours_per_day)?;
    writeln!(out, "  config.max_rounds = {}", options.max_rounds)?;
    writeln!(out, "  config.default_effort_hours = {}", options.default_effort_hours)?;
    writeln!(out, "  config.strategy = {:?}", options.strategy)?;
    writeln!(out, "  config.missing_dependencies = {:?}", options.missing_dependencies)?;
    writeln!(out)?;

    writeln!(out, "tasks ({}):", plan.tasks.len())?;
    for task in &plan.tasks {
        writeln!(out, "  - {}", task.id)?;
        if let Some(ref title) = task.title {
            writeln!(out, "      title: {title}")?;
        }
        if let Some(hours) = task.effort_hours {
            writeln!(out, "      effort_hours: {hours}")?;
        }
        if !task.after.is_empty() {
            writeln!(out, "      after: {:?}", task.after)?;
        }
        if let Some(due) = task.due {
            writeln!(out, "      due: {due} (pinned)")?;
        }
    }

    Ok(())
}

/// Human-readable schedule table followed by a summary line.
pub fn write_text(
    out: &mut impl Write,
    plan: &PlanFile,
    report: &ScheduleReport,
    today: NaiveDate,
) -> io::Result<()> {
    let default_effort = plan.config.default_effort_hours;
    let id_width = report
        .tasks
        .iter()
        .map(|t| t.id.len())
        .max()
        .unwrap_or(0)
        .max("ID".len());

    writeln!(out, "schedule from {today} (rounds: {})", report.rounds)?;
    writeln!(out)?;
    writeln!(out, "  {:<id_width$}  {:<10}  {:>6}  TITLE", "ID", "DUE", "EFFORT")?;

    for (task, config) in report.tasks.iter().zip(&plan.tasks) {
        let due = task
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let effort = match task.effort_hours {
            Some(h) => format!("{h}h"),
            None => format!("({default_effort}h)"),
        };
        let pinned = if config.due.is_some() { " [pinned]" } else { "" };

        writeln!(
            out,
            "  {:<id_width$}  {:<10}  {:>6}  {}{}",
            task.id,
            due,
            effort,
            config.title.as_deref().unwrap_or(""),
            pinned,
        )?;
    }

    let summary = report.summary(today);
    writeln!(out)?;
    write!(
        out,
        "{} of {} tasks scheduled, {} overdue",
        summary.scheduled, summary.total, summary.overdue
    )?;
    match summary.completion_date {
        Some(date) => writeln!(out, ", completion {date}")?,
        None => writeln!(out)?,
    }

    if !report.unresolved.is_empty() {
        writeln!(out, "unresolved:")?;
        for unresolved in &report.unresolved {
            writeln!(out, "  {}: {}", unresolved.id, describe(&unresolved.reason))?;
        }
    }

    Ok(())
}

fn describe(reason: &UnresolvedReason) -> String {
    match reason {
        UnresolvedReason::Cycle { members } => {
            format!("dependency cycle ({})", members.join(" -> "))
        }
        UnresolvedReason::MissingDependencies { ids } => {
            format!("unknown dependencies {}", ids.join(", "))
        }
        UnresolvedReason::BlockedBy { ids } => {
            format!("waiting on unscheduled {}", ids.join(", "))
        }
        UnresolvedReason::RoundLimit => "round limit reached; raise max_rounds".to_string(),
    }
}

#[derive(Serialize)]
struct JsonSchedule<'a> {
    today: NaiveDate,
    options: &'a ScheduleOptions,
    rounds: usize,
    summary: ScheduleSummary,
    tasks: Vec<JsonTask<'a>>,
    unresolved: &'a [UnresolvedTask],
}

#[derive(Serialize)]
struct JsonTask<'a> {
    #[serde(flatten)]
    config: &'a TaskConfig,
    due_date: Option<NaiveDate>,
}

/// Pretty-printed JSON document with options, summary, tasks and diagnostics.
pub fn write_json(
    out: &mut impl Write,
    plan: &PlanFile,
    options: &ScheduleOptions,
    report: &ScheduleReport,
    today: NaiveDate,
) -> crate::errors::Result<()> {
    let doc = JsonSchedule {
        today,
        options,
        rounds: report.rounds,
        summary: report.summary(today),
        tasks: plan
            .tasks
            .iter()
            .zip(&report.tasks)
            .map(|(config, task)| JsonTask {
                config,
                due_date: task.due_date,
            })
            .collect(),
        unresolved: &report.unresolved,
    };

    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)?;
    Ok(())
}
