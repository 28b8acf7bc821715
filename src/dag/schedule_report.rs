// src/dag/schedule_report.rs

//! Result types for a scheduler call.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::dag::resolution::ResolutionState;
use crate::dag::task_info::{TaskDescriptor, TaskId};

/// Outcome of one `schedule` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleReport {
    /// Input tasks in input order, each with its pre-set or computed due
    /// date, or still without one if it could not be scheduled.
    pub tasks: Vec<TaskDescriptor>,
    /// Relaxation rounds run after round 0, including the final round that
    /// resolved nothing. The topological strategy reports a single pass.
    pub rounds: usize,
    /// One entry per task left without a due date, in input order.
    pub unresolved: Vec<UnresolvedTask>,
}

/// A task the scheduler could not date, with the most direct reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedTask {
    pub id: TaskId,
    #[serde(flatten)]
    pub reason: UnresolvedReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// The task is part of a dependency cycle (possibly with itself).
    Cycle { members: Vec<TaskId> },
    /// The task names dependency ids that are not in the input.
    MissingDependencies { ids: Vec<TaskId> },
    /// Some direct dependencies are themselves unresolved.
    BlockedBy { ids: Vec<TaskId> },
    /// Every dependency has a date but the round budget ran out first.
    RoundLimit,
}

/// Aggregate counts over a report, relative to a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleSummary {
    pub total: usize,
    pub scheduled: usize,
    pub unresolved: usize,
    /// Tasks whose due date lies strictly before the reference day.
    pub overdue: usize,
    /// Latest due date in the schedule.
    pub completion_date: Option<NaiveDate>,
}

impl ScheduleReport {
    pub(crate) fn empty() -> Self {
        Self {
            tasks: Vec::new(),
            rounds: 0,
            unresolved: Vec::new(),
        }
    }

    pub fn due_date_of(&self, id: &str) -> Option<NaiveDate> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .and_then(|t| t.due_date)
    }

    pub fn unresolved_reason_of(&self, id: &str) -> Option<&UnresolvedReason> {
        self.unresolved
            .iter()
            .find(|u| u.id == id)
            .map(|u| &u.reason)
    }

    pub fn is_fully_scheduled(&self) -> bool {
        self.unresolved.is_empty()
    }

    pub fn completion_date(&self) -> Option<NaiveDate> {
        self.tasks.iter().filter_map(|t| t.due_date).max()
    }

    pub fn summary(&self, today: NaiveDate) -> ScheduleSummary {
        let scheduled = self.tasks.iter().filter(|t| t.is_resolved()).count();
        let overdue = self
            .tasks
            .iter()
            .filter(|t| t.due_date.is_some_and(|d| d < today))
            .count();

        ScheduleSummary {
            total: self.tasks.len(),
            scheduled,
            unresolved: self.tasks.len() - scheduled,
            overdue,
            completion_date: self.completion_date(),
        }
    }
}

/// Explain every task left without a date.
///
/// Checks, in order: cycle membership, blocking unknown ids, unresolved
/// direct dependencies. A task passing all three only missed the round
/// budget.
pub(crate) fn diagnose(state: &ResolutionState<'_>) -> Vec<UnresolvedTask> {
    let graph = state.graph();

    let mut cycle_of: HashMap<usize, Vec<TaskId>> = HashMap::new();
    for component in graph.cyclic_components(|i| state.is_preset(i)) {
        let members: Vec<TaskId> = component.iter().map(|&i| graph.id(i).to_string()).collect();
        for &i in &component {
            cycle_of.insert(i, members.clone());
        }
    }

    (0..graph.len())
        .filter(|&i| state.due(i).is_none())
        .map(|i| {
            let reason = if let Some(members) = cycle_of.remove(&i) {
                UnresolvedReason::Cycle { members }
            } else if state.is_blocked(i) {
                UnresolvedReason::MissingDependencies {
                    ids: graph.missing_dependencies_of(i).to_vec(),
                }
            } else {
                let mut ids: Vec<TaskId> = Vec::new();
                for &dep in graph.dependencies_of(i) {
                    let id = graph.id(dep);
                    if state.due(dep).is_none() && !ids.iter().any(|x| x == id) {
                        ids.push(id.to_string());
                    }
                }
                if ids.is_empty() {
                    UnresolvedReason::RoundLimit
                } else {
                    UnresolvedReason::BlockedBy { ids }
                }
            };

            UnresolvedTask {
                id: graph.id(i).to_string(),
                reason,
            }
        })
        .collect()
}
