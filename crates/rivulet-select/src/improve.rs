//! Randomized improvement phase.
//!
//! Each covered output, largest first, keeps drawing one entry at a time.
//! A draw is accepted only if the new covering sum stays below the target's
//! `max` and lands strictly closer to its `aim`. The first rejected draw
//! leaves the entry in the pool and ends improvement for that output; later
//! outputs still get their turn.

use rivulet_core::error::SelectionError;
use rivulet_core::pool::Pool;
use rivulet_core::traits::DrawSource;
use rivulet_core::types::Selection;
use tracing::{debug, trace};

use crate::change::compute_change;
use crate::coverage::{Coverage, Covered};

/// Why improvement stopped for one output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No global input budget left.
    BudgetSpent,
    /// The covering sum already reached the aim.
    AimReached,
    /// Nothing left to draw.
    PoolEmpty,
    /// The drawn entry would not have improved the selection.
    Rejected,
}

/// Grow one output's inputs toward its aim.
///
/// Accepted entries are removed from `pool` and charged to `budget`.
pub fn improve_output<D: DrawSource + ?Sized>(
    covered: &mut Covered,
    pool: &mut Pool,
    budget: &mut usize,
    draws: &mut D,
) -> StopReason {
    let range = covered.range();
    loop {
        if *budget == 0 {
            return StopReason::BudgetSpent;
        }
        if covered.sum >= range.aim {
            return StopReason::AimReached;
        }
        let Some(slot) = pool.sample(draws) else {
            return StopReason::PoolEmpty;
        };
        let Some(value) = pool.get(slot).map(|e| e.value) else {
            return StopReason::PoolEmpty;
        };

        let candidate = covered.sum + value as u128;
        if !range.improves(covered.sum, candidate) {
            trace!(candidate, current = covered.sum, "improve: draw rejected");
            return StopReason::Rejected;
        }
        let Some(entry) = pool.take(slot) else {
            return StopReason::PoolEmpty;
        };
        covered.inputs.push(entry);
        covered.sum = candidate;
        *budget -= 1;
    }
}

/// Run improvement for every covered output and assemble the selection.
///
/// Returns the finished selection and the pool left after every accepted draw.
pub fn improve<D: DrawSource + ?Sized>(
    coverage: Coverage,
    draws: &mut D,
) -> Result<(Selection, Pool), SelectionError> {
    let Coverage {
        covered,
        mut pool,
        mut budget,
    } = coverage;

    let mut selection = Selection::new();
    for mut item in covered {
        let before = item.inputs.len();
        let reason = improve_output(&mut item, &mut pool, &mut budget, draws);
        debug!(
            amount = item.output.amount,
            added = item.inputs.len() - before,
            sum = item.sum,
            ?reason,
            "improve: output finished"
        );
        let change = compute_change(item.output.amount, &item.inputs)?;
        selection.append(item.inputs, item.output, change);
    }

    Ok((selection, pool))
}
