//! Trait interfaces consumed by the selection algorithms.
//!
//! These traits define the contracts between crates:
//! - [`DrawSource`] — sequential source of uniform random draws
//! - [`SelectionOptions`] — input budget and final validation (rivulet-select's
//!   `SelectionConfig` implements)
//! - [`FallbackSelector`] — deterministic algorithm used when random coverage
//!   fails (rivulet-select's `LargestFirst` implements)

use crate::error::SelectionError;
use crate::pool::Pool;
use crate::types::{Output, Selection};

/// Sequential source of random draws.
///
/// Each call consumes exactly one logical draw. Given the same generator
/// state and the same sequence of `len` arguments, an implementation must
/// return the same sequence of results.
pub trait DrawSource {
    /// Uniformly pick an index in `0..len`. `len` is always non-zero.
    fn draw_index(&mut self, len: usize) -> usize;
}

impl<D: DrawSource + ?Sized> DrawSource for &mut D {
    fn draw_index(&mut self, len: usize) -> usize {
        (**self).draw_index(len)
    }
}

/// Caller-supplied policy for a selection run.
pub trait SelectionOptions: Send + Sync {
    /// Cap on the total number of entries a request with `output_count`
    /// outputs may consume.
    fn max_input_count(&self, output_count: usize) -> usize;

    /// Accept or reject a finished selection. The `Err` carries a
    /// human-readable reason.
    fn validate(&self, selection: &Selection) -> Result<(), String>;
}

/// Deterministic selection strategy invoked with the original, unmodified
/// request when random coverage cannot succeed.
pub trait FallbackSelector: Send + Sync {
    /// Select entries from `pool` covering every output.
    ///
    /// Returns the selection and the pool with the consumed entries removed.
    fn select(
        &self,
        options: &dyn SelectionOptions,
        outputs: &[Output],
        pool: Pool,
    ) -> Result<(Selection, Pool), SelectionError>;
}
