// src/dag/resolution.rs

//! Per-call due-date table shared by both scheduling strategies.

use chrono::{Days, NaiveDate};
use tracing::{debug, warn};

use crate::dag::graph::DagGraph;
use crate::dag::scheduler::ScheduleOptions;
use crate::dag::task_info::{TaskDescriptor, days_needed};
use crate::errors::{DuedagError, Result};
use crate::types::MissingDependencies;

/// Mutable resolution state for one `schedule` call.
///
/// All tables are indexed by input position. `due` is updated in place, so a
/// task resolved earlier in a sweep is visible to every later task of the
/// same sweep.
#[derive(Debug)]
pub struct ResolutionState<'a> {
    graph: &'a DagGraph,
    today: NaiveDate,
    /// Days each task adds on top of its latest dependency.
    durations: Vec<u64>,
    /// Whether the task arrived with a due date.
    preset: Vec<bool>,
    /// Whether an unknown dependency id blocks the task for good.
    blocked: Vec<bool>,
    due: Vec<Option<NaiveDate>>,
}

impl<'a> ResolutionState<'a> {
    pub fn new(
        graph: &'a DagGraph,
        tasks: &[TaskDescriptor],
        today: NaiveDate,
        options: &ScheduleOptions,
    ) -> Self {
        let durations = tasks
            .iter()
            .map(|t| days_needed(t, options.default_effort_hours, options.hours_per_day))
            .collect();

        let blocked = (0..graph.len())
            .map(|i| {
                let missing = graph.missing_dependencies_of(i);
                if missing.is_empty() {
                    return false;
                }
                match options.missing_dependencies {
                    MissingDependencies::Block => {
                        warn!(
                            task = %graph.id(i),
                            missing = ?missing,
                            "task depends on unknown ids; it will not be scheduled"
                        );
                        true
                    }
                    MissingDependencies::Ignore => {
                        debug!(
                            task = %graph.id(i),
                            missing = ?missing,
                            "ignoring unknown dependency ids"
                        );
                        false
                    }
                }
            })
            .collect();

        Self {
            graph,
            today,
            durations,
            preset: tasks.iter().map(TaskDescriptor::is_resolved).collect(),
            blocked,
            due: tasks.iter().map(|t| t.due_date).collect(),
        }
    }

    pub fn graph(&self) -> &'a DagGraph {
        self.graph
    }

    pub fn is_preset(&self, index: usize) -> bool {
        self.preset[index]
    }

    pub fn is_blocked(&self, index: usize) -> bool {
        self.blocked[index]
    }

    pub fn due(&self, index: usize) -> Option<NaiveDate> {
        self.due[index]
    }

    pub fn into_due_dates(self) -> Vec<Option<NaiveDate>> {
        self.due
    }

    /// Resolve `index` if all of its dependencies have dates.
    ///
    /// Returns `true` when the task was newly resolved by this call.
    pub fn try_resolve(&mut self, index: usize) -> Result<bool> {
        if self.due[index].is_some() || self.blocked[index] {
            return Ok(false);
        }

        let Some(latest) = self.latest_dependency_date(index) else {
            return Ok(false);
        };
        let base = latest.unwrap_or(self.today);
        let days = self.durations[index];

        let date = base
            .checked_add_days(Days::new(days))
            .ok_or_else(|| DuedagError::DateOutOfRange {
                task: self.graph.id(index).to_string(),
                from: base,
                days,
            })?;

        debug!(
            task = %self.graph.id(index),
            %base,
            days,
            due = %date,
            "resolved due date"
        );
        self.due[index] = Some(date);
        Ok(true)
    }

    /// Latest due date among the known dependencies of `index`.
    ///
    /// - `None`: some dependency is still unresolved.
    /// - `Some(None)`: the task has no known dependencies.
    fn latest_dependency_date(&self, index: usize) -> Option<Option<NaiveDate>> {
        self.graph
            .dependencies_of(index)
            .iter()
            .try_fold(None, |latest: Option<NaiveDate>, &dep| {
                let date = self.due[dep]?;
                Some(Some(latest.map_or(date, |l| l.max(date))))
            })
    }
}
