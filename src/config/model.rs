// src/config/model.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dag::{
    DEFAULT_EFFORT_HOURS, DEFAULT_HOURS_PER_DAY, DEFAULT_MAX_ROUNDS, ScheduleOptions,
    TaskDescriptor,
};
use crate::types::{MissingDependencies, Strategy, TaskPriority, TaskStatus};

/// Plan file exactly as deserialized from TOML, before validation.
///
/// ```toml
/// [config]
/// hours_per_day = 6
/// strategy = "relaxation"
///
/// [[task]]
/// id = "backend-api"
/// effort_hours = 8
///
/// [[task]]
/// id = "docs"
/// after = ["backend-api"]
/// ```
///
/// All sections are optional and have reasonable defaults. `[[task]]`
/// entries keep their declaration order.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawPlanFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default, rename = "task")]
    pub tasks: Vec<TaskConfig>,
}

/// A validated plan. Obtain one through `PlanFile::try_from(raw)` or
/// [`crate::config::load_and_validate`].
#[derive(Debug, Clone)]
pub struct PlanFile {
    pub config: ConfigSection,
    pub tasks: Vec<TaskConfig>,
}

impl PlanFile {
    pub(crate) fn new_unchecked(config: ConfigSection, tasks: Vec<TaskConfig>) -> Self {
        Self { config, tasks }
    }

    pub fn task(&self, id: &str) -> Option<&TaskConfig> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Scheduling projection of every task, in declaration order.
    pub fn descriptors(&self) -> Vec<TaskDescriptor> {
        self.tasks.iter().map(TaskConfig::descriptor).collect()
    }

    /// Scheduler options from the `[config]` section.
    pub fn schedule_options(&self) -> ScheduleOptions {
        ScheduleOptions {
            hours_per_day: self.config.hours_per_day,
            max_rounds: self.config.max_rounds,
            default_effort_hours: self.config.default_effort_hours,
            strategy: self.config.strategy,
            missing_dependencies: self.config.missing_dependencies,
        }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConfigSection {
    /// Working hours per calendar day (default 6).
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: f64,

    /// Relaxation round budget (default 10).
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,

    /// Effort assumed for tasks without `effort_hours` (default 4).
    #[serde(default = "default_effort_hours")]
    pub default_effort_hours: f64,

    /// `"relaxation"` (default) or `"topological"`.
    #[serde(default)]
    pub strategy: Strategy,

    /// `"block"` (default) or `"ignore"`.
    #[serde(default)]
    pub missing_dependencies: MissingDependencies,
}

fn default_hours_per_day() -> f64 {
    DEFAULT_HOURS_PER_DAY
}

fn default_max_rounds() -> usize {
    DEFAULT_MAX_ROUNDS
}

fn default_effort_hours() -> f64 {
    DEFAULT_EFFORT_HOURS
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            hours_per_day: default_hours_per_day(),
            max_rounds: default_max_rounds(),
            default_effort_hours: default_effort_hours(),
            strategy: Strategy::default(),
            missing_dependencies: MissingDependencies::default(),
        }
    }
}

/// One `[[task]]` entry.
///
/// Only `id`, `effort_hours`, `after` and `due` feed the scheduler; the rest
/// is board metadata passed through to the output.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TaskConfig {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_hours: Option<f64>,

    /// Ids of the tasks this one waits for.
    #[serde(default)]
    pub after: Vec<String>,

    /// Pre-set due date as a quoted ISO date (`due = "2026-11-02"`). Never
    /// recomputed by the scheduler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl TaskConfig {
    pub fn descriptor(&self) -> TaskDescriptor {
        TaskDescriptor {
            id: self.id.clone(),
            effort_hours: self.effort_hours,
            dependency_ids: self.after.clone(),
            due_date: self.due,
        }
    }
}
