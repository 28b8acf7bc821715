// src/dag/task_info.rs

//! Task descriptors: the scheduling projection of a board task.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Canonical task identifier type used throughout the scheduler.
pub type TaskId = String;

/// Effort assumed for tasks that carry no estimate.
pub const DEFAULT_EFFORT_HOURS: f64 = 4.0;

/// Working hours that make up one calendar day of progress.
pub const DEFAULT_HOURS_PER_DAY: f64 = 6.0;

/// Input and output unit of the scheduler.
///
/// On input `due_date` is normally `None`. A task that already carries a due
/// date is treated as resolved and is never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub id: TaskId,

    /// Estimated effort in hours. `None` falls back to the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_hours: Option<f64>,

    /// Ids of the tasks this one waits for. May name tasks that are not part
    /// of the scheduled collection.
    #[serde(default)]
    pub dependency_ids: Vec<TaskId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl TaskDescriptor {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            effort_hours: None,
            dependency_ids: Vec::new(),
            due_date: None,
        }
    }

    pub fn with_effort(mut self, hours: f64) -> Self {
        self.effort_hours = Some(hours);
        self
    }

    pub fn depends_on(mut self, id: impl Into<TaskId>) -> Self {
        self.dependency_ids.push(id.into());
        self
    }

    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn is_resolved(&self) -> bool {
        self.due_date.is_some()
    }
}

/// Whole calendar days a task adds on top of its latest dependency.
///
/// Negative and non-finite effort is clamped to zero hours.
pub(crate) fn days_needed(
    task: &TaskDescriptor,
    default_effort_hours: f64,
    hours_per_day: f64,
) -> u64 {
    let hours = task.effort_hours.unwrap_or(default_effort_hours);
    let hours = if hours.is_finite() && hours >= 0.0 {
        hours
    } else {
        warn!(
            task = %task.id,
            effort_hours = hours,
            "invalid effort estimate; clamping to 0 hours"
        );
        0.0
    };

    // Saturating float-to-int cast; absurd estimates surface later as
    // DateOutOfRange.
    (hours / hours_per_day).ceil() as u64
}
