//! # rivulet-select — random-improve coin selection.
//!
//! Picks entries from a [`Pool`](rivulet_core::Pool) to pay a list of
//! outputs while steering each output's change toward the size of the
//! payment itself, so the pool stays well-shaped for future selections.
//!
//! The algorithm runs in two randomized phases:
//! - **Coverage** draws entries per output, largest output first, until each
//!   output is paid.
//! - **Improvement** keeps drawing for each output while doing so moves the
//!   covering sum strictly closer to twice the payment without reaching three
//!   times it.
//!
//! If coverage fails the whole request is handed to a deterministic
//! fallback, [`LargestFirst`] by default.
//!
//! # Modules
//!
//! - [`target`] — `TargetRange` acceptance bounds
//! - [`change`] — change amounts for a covering input set
//! - [`coverage`] — randomized coverage phase
//! - [`improve`] — randomized improvement phase
//! - [`random_improve`] — orchestration and fallback delegation
//! - [`largest_first`] — deterministic fallback algorithm
//! - [`config`] — `SelectionConfig` options

pub mod change;
pub mod config;
pub mod coverage;
pub mod improve;
pub mod largest_first;
pub mod random_improve;
pub mod target;

pub use change::{compute_change, split_change};
pub use config::{MaxInputCount, SelectionConfig};
pub use largest_first::LargestFirst;
pub use random_improve::{RandomImprove, random_improve};
pub use target::TargetRange;
