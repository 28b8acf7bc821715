// src/dag/topological.rs

//! Single-pass propagation in dependency order.

use tracing::debug;

use crate::dag::resolution::ResolutionState;
use crate::errors::Result;

/// Resolve every resolvable task in one pass over the strongly connected
/// components of the graph.
///
/// Tasks with a pre-set date keep it and have their incoming edges dropped,
/// so they never take part in a cycle. Components with more than one member
/// are cycles and stay unresolved, as does everything downstream of them.
pub fn resolve_in_dependency_order(state: &mut ResolutionState<'_>) -> Result<()> {
    let graph = state.graph();
    let components = graph.components_in_dependency_order(|i| state.is_preset(i));

    for component in components {
        match component.as_slice() {
            [single] => {
                state.try_resolve(*single)?;
            }
            members => {
                debug!(
                    members = ?members.iter().map(|&i| graph.id(i)).collect::<Vec<_>>(),
                    "skipping dependency cycle"
                );
            }
        }
    }

    Ok(())
}
