//! Change amounts for a covering input set.

use rivulet_core::constants::MAX_COIN_VALUE;
use rivulet_core::error::SelectionError;
use rivulet_core::types::{Entry, sum_values};

/// Change owed when `inputs` pay an output of `target`.
///
/// The inputs must cover the target; a shortfall can only come from a defect
/// in the caller and is reported as [`SelectionError::InvariantViolation`].
pub fn compute_change(target: u64, inputs: &[Entry]) -> Result<Vec<u64>, SelectionError> {
    let sum = sum_values(inputs);
    let diff = sum.checked_sub(target as u128).ok_or_else(|| {
        SelectionError::InvariantViolation(format!(
            "inputs sum {sum} does not cover target {target}"
        ))
    })?;
    Ok(split_change(diff))
}

/// Split `diff` into change amounts that each fit in a single value.
///
/// Zero yields no change, a representable diff yields one amount, and a larger
/// diff is divided into the fewest near-equal parts, smallest first. Parts
/// differ by at most one.
pub fn split_change(diff: u128) -> Vec<u64> {
    let max = MAX_COIN_VALUE as u128;
    if diff == 0 {
        return Vec::new();
    }
    if diff <= max {
        return vec![diff as u64];
    }

    let parts = diff.div_ceil(max);
    let base = diff / parts;
    let larger = diff % parts;
    // `base < max` whenever `larger > 0`, so `base + 1` still fits.
    let mut change = Vec::with_capacity(parts as usize);
    change.extend(std::iter::repeat_n(base as u64, (parts - larger) as usize));
    change.extend(std::iter::repeat_n((base + 1) as u64, larger as usize));
    change
}
