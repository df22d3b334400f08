//! Randomized coverage phase.
//!
//! Outputs are paid largest first. For each output, entries are drawn
//! uniformly from the remaining pool until their sum reaches the requested
//! amount. Running out of budget or of entries aborts the whole phase; the
//! caller then discards every draw made so far.

use rivulet_core::pool::Pool;
use rivulet_core::traits::DrawSource;
use rivulet_core::types::{Entry, Output};
use thiserror::Error;
use tracing::trace;

use crate::target::TargetRange;

/// Why coverage could not pay every output.
///
/// Never surfaced to callers of the orchestrator: any failure sends the
/// original request to the fallback algorithm.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageFailure {
    /// Paying the output at this position would exceed the input budget.
    #[error("input budget exhausted while covering output {position}")]
    BudgetExhausted { position: usize },
    /// The pool ran dry before the output at this position was paid.
    #[error("pool exhausted while covering output {position}")]
    PoolExhausted { position: usize },
}

/// An output together with the entries currently paying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Covered {
    pub output: Output,
    pub inputs: Vec<Entry>,
    pub sum: u128,
}

impl Covered {
    pub fn range(&self) -> TargetRange {
        TargetRange::for_amount(self.output.amount)
    }
}

/// State handed from coverage to improvement.
#[derive(Debug, Clone)]
pub struct Coverage {
    /// Covered outputs, largest amount first.
    pub covered: Vec<Covered>,
    /// Pool with every drawn entry removed.
    pub pool: Pool,
    /// Inputs still allowed across the remaining phases.
    pub budget: usize,
}

/// Outputs sorted by descending amount. Equal amounts keep their request order.
pub fn sort_descending(outputs: &[Output]) -> Vec<Output> {
    let mut sorted = outputs.to_vec();
    sorted.sort_by(|a, b| b.amount.cmp(&a.amount));
    sorted
}

/// Cover every output in `outputs` (already in processing order).
pub fn cover<D: DrawSource + ?Sized>(
    outputs: &[Output],
    mut pool: Pool,
    mut budget: usize,
    draws: &mut D,
) -> Result<Coverage, CoverageFailure> {
    let mut covered = Vec::with_capacity(outputs.len());

    for (position, output) in outputs.iter().enumerate() {
        let range = TargetRange::for_amount(output.amount);
        let mut inputs = Vec::new();
        let mut sum: u128 = 0;

        while !range.is_covered_by(sum) {
            if budget == 0 {
                return Err(CoverageFailure::BudgetExhausted { position });
            }
            let entry = pool
                .sample(draws)
                .and_then(|slot| pool.take(slot))
                .ok_or(CoverageFailure::PoolExhausted { position })?;
            trace!(position, entry = %entry.id, value = entry.value, "coverage: drew entry");
            sum += entry.value as u128;
            inputs.push(entry);
            budget -= 1;
        }

        covered.push(Covered {
            output: *output,
            inputs,
            sum,
        });
    }

    Ok(Coverage {
        covered,
        pool,
        budget,
    })
}
