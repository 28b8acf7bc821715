// src/dag/graph.rs

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;

use crate::dag::task_info::{TaskDescriptor, TaskId};
use crate::errors::{DuedagError, Result};

/// Internal node structure: dependencies split into known and unknown ids.
#[derive(Debug, Clone, Default)]
struct DagNode {
    /// Indices of dependencies present in the input, in declaration order.
    deps: Vec<usize>,
    /// Dependency ids that name no task in the input.
    missing: Vec<TaskId>,
}

/// Index-addressed dependency graph over one scheduler input.
///
/// Node `i` is the `i`-th task of the input slice, so per-task tables in the
/// scheduler can be plain vectors. Cycles are allowed here; the scheduler
/// simply never resolves them.
#[derive(Debug, Clone)]
pub struct DagGraph {
    ids: Vec<TaskId>,
    index: HashMap<TaskId, usize>,
    nodes: Vec<DagNode>,
}

impl DagGraph {
    /// Build the graph for `tasks`. Fails only on duplicate ids.
    pub fn from_tasks(tasks: &[TaskDescriptor]) -> Result<Self> {
        let mut index = HashMap::with_capacity(tasks.len());

        // First pass: assign indices.
        for (i, task) in tasks.iter().enumerate() {
            if index.insert(task.id.clone(), i).is_some() {
                return Err(DuedagError::DuplicateTask(task.id.clone()));
            }
        }

        // Second pass: resolve dependency ids against the index.
        let nodes = tasks
            .iter()
            .map(|task| {
                let mut node = DagNode::default();
                for dep in &task.dependency_ids {
                    match index.get(dep) {
                        Some(&d) => node.deps.push(d),
                        None => node.missing.push(dep.clone()),
                    }
                }
                node
            })
            .collect();

        Ok(Self {
            ids: tasks.iter().map(|t| t.id.clone()).collect(),
            index,
            nodes,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Id of the task at `index`.
    pub fn id(&self, index: usize) -> &str {
        &self.ids[index]
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Dependencies of a task that are present in the input.
    pub fn dependencies_of(&self, index: usize) -> &[usize] {
        self.nodes
            .get(index)
            .map(|n| n.deps.as_slice())
            .unwrap_or(&[])
    }

    /// Dependency ids of a task that match no task in the input.
    pub fn missing_dependencies_of(&self, index: usize) -> &[TaskId] {
        self.nodes
            .get(index)
            .map(|n| n.missing.as_slice())
            .unwrap_or(&[])
    }

    /// Strongly connected components, dependencies before dependents.
    ///
    /// Edges into tasks for which `frozen` returns `true` are dropped: those
    /// tasks keep a pre-set date, so their own dependencies never matter and
    /// cannot close a cycle.
    pub fn components_in_dependency_order(
        &self,
        frozen: impl Fn(usize) -> bool,
    ) -> Vec<Vec<usize>> {
        let graph = self.petgraph(&frozen);

        // tarjan_scc yields components in reverse topological order.
        let mut components = tarjan_scc(&graph);
        components.reverse();
        components
    }

    /// Components that form a cycle: more than one member, or a single task
    /// that depends on itself. Members are sorted by input position.
    pub fn cyclic_components(&self, frozen: impl Fn(usize) -> bool) -> Vec<Vec<usize>> {
        let graph = self.petgraph(&frozen);

        tarjan_scc(&graph)
            .into_iter()
            .filter(|component| match component.as_slice() {
                [single] => graph.contains_edge(*single, *single),
                _ => true,
            })
            .map(|mut component| {
                component.sort_unstable();
                component
            })
            .collect()
    }

    // Edge direction: dep -> task, so a topological order lists
    // dependencies first.
    fn petgraph(&self, frozen: &impl Fn(usize) -> bool) -> DiGraphMap<usize, ()> {
        let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();

        for i in 0..self.len() {
            graph.add_node(i);
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if frozen(i) {
                continue;
            }
            for &dep in &node.deps {
                graph.add_edge(dep, i, ());
            }
        }

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, deps: &[&str]) -> TaskDescriptor {
        deps.iter()
            .fold(TaskDescriptor::new(id), |t, d| t.depends_on(*d))
    }

    #[test]
    fn splits_known_and_missing_dependencies() {
        let tasks = vec![task("a", &[]), task("b", &["a", "ghost"])];
        let graph = DagGraph::from_tasks(&tasks).unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.dependencies_of(1), &[0]);
        assert_eq!(graph.missing_dependencies_of(1), &["ghost".to_string()]);
        assert_eq!(graph.index_of("b"), Some(1));
        assert_eq!(graph.id(0), "a");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let tasks = vec![task("a", &[]), task("a", &[])];
        match DagGraph::from_tasks(&tasks) {
            Err(DuedagError::DuplicateTask(id)) => assert_eq!(id, "a"),
            other => panic!("expected DuplicateTask, got {other:?}"),
        }
    }

    #[test]
    fn components_list_dependencies_first() {
        // c -> b -> a, declared in reverse order.
        let tasks = vec![task("c", &["b"]), task("b", &["a"]), task("a", &[])];
        let graph = DagGraph::from_tasks(&tasks).unwrap();

        let order: Vec<usize> = graph
            .components_in_dependency_order(|_| false)
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn cycles_include_self_loops_but_not_frozen_members() {
        let tasks = vec![
            task("x", &["y"]),
            task("y", &["x"]),
            task("s", &["s"]),
            task("free", &[]),
        ];
        let graph = DagGraph::from_tasks(&tasks).unwrap();

        let mut cycles = graph.cyclic_components(|_| false);
        cycles.sort();
        assert_eq!(cycles, vec![vec![0, 1], vec![2]]);

        // Freezing x breaks the x <-> y cycle.
        let cycles = graph.cyclic_components(|i| i == 0);
        assert_eq!(cycles, vec![vec![2]]);
    }
}
