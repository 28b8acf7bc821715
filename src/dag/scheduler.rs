// src/dag/scheduler.rs

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::dag::graph::DagGraph;
use crate::dag::relaxation::relax;
use crate::dag::resolution::ResolutionState;
use crate::dag::schedule_report::{ScheduleReport, diagnose};
use crate::dag::task_info::{DEFAULT_EFFORT_HOURS, DEFAULT_HOURS_PER_DAY, TaskDescriptor};
use crate::dag::topological::resolve_in_dependency_order;
use crate::errors::{DuedagError, Result};
use crate::types::{MissingDependencies, Strategy};

/// Round budget of the relaxation strategy unless configured otherwise.
pub const DEFAULT_MAX_ROUNDS: usize = 10;

/// Tunables for a scheduler call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleOptions {
    /// Working hours per calendar day. Must be positive.
    pub hours_per_day: f64,
    /// Rounds the relaxation strategy may run after round 0.
    pub max_rounds: usize,
    /// Effort used for tasks without an estimate.
    pub default_effort_hours: f64,
    pub strategy: Strategy,
    pub missing_dependencies: MissingDependencies,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            hours_per_day: DEFAULT_HOURS_PER_DAY,
            max_rounds: DEFAULT_MAX_ROUNDS,
            default_effort_hours: DEFAULT_EFFORT_HOURS,
            strategy: Strategy::default(),
            missing_dependencies: MissingDependencies::default(),
        }
    }
}

impl ScheduleOptions {
    /// Reject option values the date arithmetic cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.hours_per_day.is_finite() && self.hours_per_day > 0.0) {
            return Err(DuedagError::InvalidOption(format!(
                "hours_per_day must be a positive number (got {})",
                self.hours_per_day
            )));
        }

        if !(self.default_effort_hours.is_finite() && self.default_effort_hours >= 0.0) {
            return Err(DuedagError::InvalidOption(format!(
                "default_effort_hours must be a non-negative number (got {})",
                self.default_effort_hours
            )));
        }

        Ok(())
    }
}

/// Computes due dates for a collection of tasks.
///
/// The scheduler holds only its options; every call works on its own copy of
/// the input, so one instance can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    options: ScheduleOptions,
}

impl Scheduler {
    pub fn new(options: ScheduleOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ScheduleOptions {
        &self.options
    }

    /// Date every task in `tasks`, counting from `today`.
    ///
    /// Cycles and unknown dependency ids never produce an error: the affected
    /// tasks come back without a due date and are listed in
    /// [`ScheduleReport::unresolved`]. Errors are reserved for duplicate ids
    /// and dates beyond the calendar range.
    pub fn schedule(&self, tasks: &[TaskDescriptor], today: NaiveDate) -> Result<ScheduleReport> {
        if tasks.is_empty() {
            debug!("schedule called with no tasks");
            return Ok(ScheduleReport::empty());
        }

        let graph = DagGraph::from_tasks(tasks)?;
        let mut state = ResolutionState::new(&graph, tasks, today, &self.options);

        let rounds = match self.options.strategy {
            Strategy::Relaxation => relax(&mut state, self.options.max_rounds)?,
            Strategy::Topological => {
                resolve_in_dependency_order(&mut state)?;
                1
            }
        };

        let unresolved = diagnose(&state);
        let tasks: Vec<TaskDescriptor> = tasks
            .iter()
            .zip(state.into_due_dates())
            .map(|(task, due_date)| TaskDescriptor {
                due_date,
                ..task.clone()
            })
            .collect();

        if unresolved.is_empty() {
            info!(
                tasks = tasks.len(),
                rounds,
                strategy = ?self.options.strategy,
                "all tasks scheduled"
            );
        } else {
            warn!(
                tasks = tasks.len(),
                unresolved = unresolved.len(),
                rounds,
                strategy = ?self.options.strategy,
                "some tasks could not be scheduled"
            );
        }

        Ok(ScheduleReport {
            tasks,
            rounds,
            unresolved,
        })
    }
}

/// One-shot form of [`Scheduler::schedule`].
pub fn schedule(
    tasks: &[TaskDescriptor],
    today: NaiveDate,
    options: &ScheduleOptions,
) -> Result<ScheduleReport> {
    Scheduler::new(options.clone())?.schedule(tasks, today)
}
