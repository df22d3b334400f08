//! Selection constants. All values are in the currency's smallest unit.

/// Largest value a single entry, output or change amount can carry.
///
/// Sums of values are carried as `u128` so they may exceed this bound;
/// change beyond it is split across several amounts.
pub const MAX_COIN_VALUE: u64 = u64::MAX;

/// Multiplier applied to a requested amount to obtain the ideal covering sum.
pub const TARGET_AIM_FACTOR: u128 = 2;

/// Multiplier applied to a requested amount to obtain the exclusive upper
/// bound on an improved covering sum.
pub const TARGET_MAX_FACTOR: u128 = 3;

/// Default global input cap for a request when no policy is configured.
pub const DEFAULT_MAX_INPUT_COUNT: usize = 100;
