//! Largest-first coin selection.
//!
//! The deterministic fallback: outputs are paid largest first, each from the
//! largest entries still unspent, until the output is covered. No draws are
//! made.

use rivulet_core::error::SelectionError;
use rivulet_core::pool::Pool;
use rivulet_core::traits::{FallbackSelector, SelectionOptions};
use rivulet_core::types::{Output, Selection, sum_amounts};
use tracing::debug;

use crate::change::compute_change;
use crate::coverage::sort_descending;

/// Greedy selector spending the largest entries first.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestFirst;

impl FallbackSelector for LargestFirst {
    fn select(
        &self,
        options: &dyn SelectionOptions,
        outputs: &[Output],
        mut pool: Pool,
    ) -> Result<(Selection, Pool), SelectionError> {
        let available = pool.total_value();
        let requested = sum_amounts(outputs);
        if available < requested {
            return Err(SelectionError::InsufficientFunds {
                available,
                requested,
            });
        }
        if pool.len() < outputs.len() {
            return Err(SelectionError::NotFragmentedEnough {
                entries: pool.len(),
                outputs: outputs.len(),
            });
        }

        let max = options.max_input_count(outputs.len());

        // Largest value first; equal values keep pool order.
        let mut by_value: Vec<(usize, u64)> =
            pool.iter_slots().map(|(slot, e)| (slot, e.value)).collect();
        by_value.sort_by(|a, b| b.1.cmp(&a.1));
        let mut candidates = by_value.into_iter().map(|(slot, _)| slot);

        let mut selection = Selection::new();
        let mut used = 0usize;
        for output in sort_descending(outputs) {
            let mut inputs = Vec::new();
            let mut sum: u128 = 0;
            while sum < output.amount as u128 {
                if used == max {
                    return Err(SelectionError::MaximumInputCountExceeded { max });
                }
                let entry = candidates
                    .next()
                    .and_then(|slot| pool.take(slot))
                    .ok_or(SelectionError::FullyDepleted)?;
                sum += entry.value as u128;
                inputs.push(entry);
                used += 1;
            }
            let change = compute_change(output.amount, &inputs)?;
            selection.append(inputs, output, change);
        }

        debug!(
            inputs = selection.inputs.len(),
            outputs = selection.outputs.len(),
            "largest_first: selection complete"
        );
        options
            .validate(&selection)
            .map_err(SelectionError::InvalidSelection)?;
        Ok((selection, pool))
    }
}
