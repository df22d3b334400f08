//! Error types for coin selection.
use thiserror::Error;

/// Errors surfaced to callers of a selection algorithm.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The pool does not hold enough value to pay every requested output.
    #[error("insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Total value held by the pool.
        available: u128,
        /// Total amount requested.
        requested: u128,
    },

    /// The pool has fewer entries than there are outputs to pay.
    #[error("pool not fragmented enough: {entries} entries for {outputs} outputs")]
    NotFragmentedEnough { entries: usize, outputs: usize },

    /// The pool ran out of entries before every output was covered.
    #[error("pool fully depleted before all outputs were covered")]
    FullyDepleted,

    /// Covering the outputs would consume more entries than allowed.
    #[error("maximum input count exceeded: max {max}")]
    MaximumInputCountExceeded { max: usize },

    /// The finished selection was rejected by the options' validator.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// Two pool entries share the same identifier.
    #[error("duplicate entry: {0}")]
    DuplicateEntry(String),

    /// An internal invariant was broken. Indicates a defect, not bad input.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
