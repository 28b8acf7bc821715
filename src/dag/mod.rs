// src/dag/mod.rs

//! Dependency graph and due-date scheduling.
//!
//! - [`graph`] holds an index-addressed dependency graph over one input.
//! - [`scheduler`] is the entry point: options, validation, strategy choice.
//! - [`relaxation`] and [`topological`] are the two propagation strategies.
//! - [`resolution`] keeps the per-call due-date table both strategies share.
//! - [`schedule_report`] defines the result and diagnostic types.
//! - [`task_info`] defines the task descriptor.

pub mod graph;
pub mod relaxation;
pub mod resolution;
pub mod schedule_report;
pub mod scheduler;
pub mod task_info;
pub mod topological;

pub use graph::DagGraph;
pub use schedule_report::{ScheduleReport, ScheduleSummary, UnresolvedReason, UnresolvedTask};
pub use scheduler::{DEFAULT_MAX_ROUNDS, ScheduleOptions, Scheduler, schedule};
pub use task_info::{DEFAULT_EFFORT_HOURS, DEFAULT_HOURS_PER_DAY, TaskDescriptor, TaskId};
