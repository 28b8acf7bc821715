// src/dag/relaxation.rs

//! Bounded fixed-point propagation.

use tracing::debug;

use crate::dag::resolution::ResolutionState;
use crate::errors::Result;

/// Run round 0 plus up to `max_rounds` sweeps over the task list.
///
/// Round 0 dates every task without known dependencies. Each following
/// round resolves every task whose dependencies all have dates, reading the
/// live table, so a chain listed in dependency order settles in one round.
/// Stops after the first round that resolves nothing.
///
/// Returns the number of rounds run after round 0.
pub fn relax(state: &mut ResolutionState<'_>, max_rounds: usize) -> Result<usize> {
    let len = state.graph().len();

    let mut roots = 0;
    for i in 0..len {
        if state.graph().dependencies_of(i).is_empty() && state.try_resolve(i)? {
            roots += 1;
        }
    }
    debug!(resolved = roots, "round 0: dated tasks without dependencies");

    let mut rounds = 0;
    let mut changed = true;

    while changed && rounds < max_rounds {
        rounds += 1;

        let mut resolved = 0;
        for i in 0..len {
            if state.try_resolve(i)? {
                resolved += 1;
            }
        }

        changed = resolved > 0;
        debug!(round = rounds, resolved, "relaxation round finished");
    }

    Ok(rounds)
}
