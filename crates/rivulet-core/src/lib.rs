//! # rivulet-core
//! Foundation types, the spendable pool, and collaborator traits for Rivulet
//! coin selection.
//!
//! # Modules
//!
//! - [`constants`] — value bounds and selection defaults
//! - [`types`] — `Hash256`, `EntryId`, `Entry`, `Output`, `Selection`
//! - [`pool`] — Fenwick-indexed pool with O(log n) sampling and removal
//! - [`draw`] — `rand`-backed [`DrawSource`](traits::DrawSource)
//! - [`traits`] — contracts consumed by the selection algorithms
//! - [`error`] — `SelectionError` enum

pub mod constants;
pub mod draw;
pub mod error;
pub mod pool;
pub mod traits;
pub mod types;

pub use draw::RngDraws;
pub use error::SelectionError;
pub use pool::Pool;
pub use traits::{DrawSource, FallbackSelector, SelectionOptions};
pub use types::{Entry, EntryId, Hash256, Output, Selection};
