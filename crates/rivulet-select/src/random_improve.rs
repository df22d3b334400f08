//! Random-improve orchestration.
//!
//! Sequences coverage and improvement, validates the result, and delegates
//! the untouched request to the fallback when coverage fails.

use rivulet_core::error::SelectionError;
use rivulet_core::pool::Pool;
use rivulet_core::traits::{DrawSource, FallbackSelector, SelectionOptions};
use rivulet_core::types::{Output, Selection};
use tracing::debug;

use crate::coverage::{cover, sort_descending};
use crate::improve::improve;
use crate::largest_first::LargestFirst;

/// Random-improve selector with a pluggable fallback.
#[derive(Debug, Clone, Default)]
pub struct RandomImprove<F = LargestFirst> {
    fallback: F,
}

impl<F: FallbackSelector> RandomImprove<F> {
    pub fn new(fallback: F) -> Self {
        Self { fallback }
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    /// Select entries from `pool` paying every output in `outputs`.
    ///
    /// On success returns the selection and the remaining pool. If random
    /// coverage fails for any output, every draw is discarded and the result
    /// is exactly what the fallback returns for the original `outputs` and
    /// `pool`, errors included.
    pub fn select<D: DrawSource + ?Sized>(
        &self,
        options: &dyn SelectionOptions,
        outputs: &[Output],
        pool: Pool,
        draws: &mut D,
    ) -> Result<(Selection, Pool), SelectionError> {
        let budget = options.max_input_count(outputs.len());
        let ordered = sort_descending(outputs);

        let coverage = match cover(&ordered, pool.clone(), budget, draws) {
            Ok(coverage) => coverage,
            Err(failure) => {
                debug!(%failure, outputs = outputs.len(), budget, "random_improve: delegating to fallback");
                return self.fallback.select(options, outputs, pool);
            }
        };

        let (selection, remaining) = improve(coverage, draws)?;
        if let Err(reason) = options.validate(&selection) {
            debug!(%reason, "random_improve: selection rejected");
            return Err(SelectionError::InvalidSelection(reason));
        }
        debug!(
            inputs = selection.inputs.len(),
            change = selection.change.len(),
            remaining = remaining.len(),
            "random_improve: selection complete"
        );
        Ok((selection, remaining))
    }
}

/// Run random-improve with the [`LargestFirst`] fallback.
pub fn random_improve<D: DrawSource + ?Sized>(
    options: &dyn SelectionOptions,
    outputs: &[Output],
    pool: Pool,
    draws: &mut D,
) -> Result<(Selection, Pool), SelectionError> {
    RandomImprove::new(LargestFirst).select(options, outputs, pool, draws)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectionConfig;
    use rivulet_core::draw::RngDraws;
    use rivulet_core::types::{Entry, EntryId, Hash256};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Script(Vec<usize>);

    impl DrawSource for Script {
        fn draw_index(&mut self, len: usize) -> usize {
            if self.0.is_empty() { 0 } else { self.0.remove(0) % len }
        }
    }

    /// Records how it was called and returns a fixed marker selection.
    #[derive(Default)]
    struct Recording {
        calls: AtomicUsize,
        seen_pool_len: AtomicUsize,
    }

    impl FallbackSelector for Recording {
        fn select(
            &self,
            _options: &dyn SelectionOptions,
            outputs: &[Output],
            pool: Pool,
        ) -> Result<(Selection, Pool), SelectionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen_pool_len.store(pool.len(), Ordering::SeqCst);
            let mut marker = Selection::new();
            marker.append(Vec::new(), outputs[0], vec![7]);
            Ok((marker, pool))
        }
    }

    fn pool_of(values: &[u64]) -> Pool {
        Pool::new(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| Entry::new(EntryId::new(Hash256([i as u8; 32]), i as u64), v))
                .collect(),
        )
        .unwrap()
    }

    fn out(seed: u8, amount: u64) -> Output {
        Output::new(Hash256([seed; 32]), amount)
    }

    #[test]
    fn improves_toward_twice_the_payment() {
        let cfg = SelectionConfig::default();
        // Coverage takes 100; improvement takes 60 then 40 to land on 200.
        let pool = pool_of(&[100, 60, 40, 500]);
        let (sel, rest) = random_improve(&cfg, &[out(1, 100)], pool, &mut Script(vec![0, 0, 0]))
            .unwrap();
        assert_eq!(sel.total_input(), 200);
        assert_eq!(sel.change, vec![100]);
        assert_eq!(rest.entries()[0].value, 500);
    }

    #[test]
    fn outputs_processed_largest_first() {
        let cfg = SelectionConfig::default();
        let pool = pool_of(&[10, 10, 10, 10, 10, 10]);
        let (sel, _) = random_improve(
            &cfg,
            &[out(1, 5), out(2, 20)],
            pool,
            &mut RngDraws::seeded(3),
        )
        .unwrap();
        assert_eq!(sel.outputs[0].amount, 20);
        assert_eq!(sel.outputs[1].amount, 5);
    }

    #[test]
    fn coverage_failure_delegates_original_request() {
        let fallback = Recording::default();
        let selector = RandomImprove::new(fallback);
        let cfg = SelectionConfig::with_max_inputs(1);
        let pool = pool_of(&[5, 5, 5]);
        let (sel, rest) = selector
            .select(&cfg, &[out(1, 12)], pool.clone(), &mut Script(vec![]))
            .unwrap();
        assert_eq!(selector.fallback().calls.load(Ordering::SeqCst), 1);
        assert_eq!(selector.fallback().seen_pool_len.load(Ordering::SeqCst), 3);
        assert_eq!(sel.change, vec![7]);
        assert_eq!(rest, pool);
    }

    #[test]
    fn fallback_errors_propagate() {
        let cfg = SelectionConfig::default();
        let err = random_improve(&cfg, &[out(1, 100)], pool_of(&[10]), &mut Script(vec![]))
            .unwrap_err();
        assert!(matches!(err, SelectionError::InsufficientFunds { .. }));
    }

    #[test]
    fn validation_failure_is_not_retried() {
        let cfg = SelectionConfig {
            dust_threshold: 1_000,
            ..SelectionConfig::default()
        };
        let err = random_improve(&cfg, &[out(1, 100)], pool_of(&[150]), &mut Script(vec![]))
            .unwrap_err();
        assert_eq!(
            err,
            SelectionError::InvalidSelection("change 50 is below dust threshold 1000".into())
        );
    }

    #[test]
    fn zero_amount_output_is_trivially_covered() {
        let cfg = SelectionConfig::default();
        let pool = pool_of(&[10]);
        let (sel, rest) = random_improve(&cfg, &[out(1, 0)], pool.clone(), &mut Script(vec![]))
            .unwrap();
        assert!(sel.inputs.is_empty());
        assert!(sel.change.is_empty());
        assert_eq!(sel.outputs.len(), 1);
        assert_eq!(rest, pool);
    }
}
