// src/config/validate.rs

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::warn;

use crate::config::model::{PlanFile, RawPlanFile};
use crate::errors::{DuedagError, Result};

impl TryFrom<RawPlanFile> for PlanFile {
    type Error = DuedagError;

    fn try_from(raw: RawPlanFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_plan(&raw)?;
        Ok(PlanFile::new_unchecked(raw.config, raw.tasks))
    }
}

fn validate_raw_plan(plan: &RawPlanFile) -> Result<()> {
    ensure_has_tasks(plan)?;
    validate_global_config(plan)?;
    validate_task_ids(plan)?;
    validate_task_efforts(plan)?;
    warn_on_dependency_shape(plan);
    Ok(())
}

fn ensure_has_tasks(plan: &RawPlanFile) -> Result<()> {
    if plan.tasks.is_empty() {
        return Err(DuedagError::ConfigError(
            "plan must contain at least one [[task]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(plan: &RawPlanFile) -> Result<()> {
    let cfg = &plan.config;

    if !(cfg.hours_per_day.is_finite() && cfg.hours_per_day > 0.0) {
        return Err(DuedagError::ConfigError(format!(
            "[config].hours_per_day must be > 0 (got {})",
            cfg.hours_per_day
        )));
    }

    if cfg.max_rounds == 0 {
        return Err(DuedagError::ConfigError(
            "[config].max_rounds must be >= 1 (got 0)".to_string(),
        ));
    }

    if !(cfg.default_effort_hours.is_finite() && cfg.default_effort_hours >= 0.0) {
        return Err(DuedagError::ConfigError(format!(
            "[config].default_effort_hours must be >= 0 (got {})",
            cfg.default_effort_hours
        )));
    }

    Ok(())
}

fn validate_task_ids(plan: &RawPlanFile) -> Result<()> {
    let mut seen = HashSet::new();
    for task in &plan.tasks {
        if task.id.trim().is_empty() {
            return Err(DuedagError::ConfigError(
                "every [[task]] needs a non-empty `id`".to_string(),
            ));
        }
        if !seen.insert(task.id.as_str()) {
            return Err(DuedagError::DuplicateTask(task.id.clone()));
        }
    }
    Ok(())
}

// The scheduler would clamp these; a plan file is a boundary where we can
// tell the author instead.
fn validate_task_efforts(plan: &RawPlanFile) -> Result<()> {
    for task in &plan.tasks {
        if let Some(hours) = task.effort_hours {
            if !(hours.is_finite() && hours >= 0.0) {
                return Err(DuedagError::ConfigError(format!(
                    "task '{}' has invalid effort_hours {}",
                    task.id, hours
                )));
            }
        }
    }
    Ok(())
}

/// Unknown references and cycles are legal input: the affected tasks just
/// stay unscheduled. Flag them early so the author is not surprised.
fn warn_on_dependency_shape(plan: &RawPlanFile) {
    let ids: HashSet<&str> = plan.tasks.iter().map(|t| t.id.as_str()).collect();

    // Edge direction: dep -> task
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for task in &plan.tasks {
        graph.add_node(task.id.as_str());
    }

    for task in &plan.tasks {
        for dep in &task.after {
            if !ids.contains(dep.as_str()) {
                warn!(
                    task = %task.id,
                    dep = %dep,
                    policy = ?plan.config.missing_dependencies,
                    "task has unknown dependency in `after`"
                );
            } else if task.due.is_none() {
                graph.add_edge(dep.as_str(), task.id.as_str(), ());
            }
        }
    }

    if let Err(cycle) = toposort(&graph, None) {
        warn!(
            task = %cycle.node_id(),
            "dependency cycle detected; tasks on it will not be scheduled"
        );
    }
}
