// src/types.rs

//! Small shared enums used by the scheduler, the plan file and the CLI.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How due dates are propagated through the dependency graph.
///
/// - `Relaxation`: bounded fixed-point iteration. Each round sweeps the task
///   list in order and resolves every task whose dependencies already have
///   dates. Resolutions are visible to later tasks in the same round. Stops
///   after a round that resolves nothing, or after `max_rounds` rounds.
/// - `Topological`: one pass over the strongly connected components of the
///   graph in dependency order. No depth limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Relaxation,
    Topological,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relaxation" => Ok(Strategy::Relaxation),
            "topological" | "topo" => Ok(Strategy::Topological),
            other => Err(format!(
                "invalid strategy: {other} (expected \"relaxation\" or \"topological\")"
            )),
        }
    }
}

/// What to do with dependency ids that name no task in the input.
///
/// - `Block` (default): the dependent can never be resolved and ends up
///   without a due date.
/// - `Ignore`: unknown ids are treated as already satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingDependencies {
    #[default]
    Block,
    Ignore,
}

impl FromStr for MissingDependencies {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "block" => Ok(MissingDependencies::Block),
            "ignore" => Ok(MissingDependencies::Ignore),
            other => Err(format!(
                "invalid missing dependency policy: {other} (expected \"block\" or \"ignore\")"
            )),
        }
    }
}

/// Board column of a task. Carried through to output only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}
