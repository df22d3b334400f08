//! Acceptance bounds for a single requested amount.

use rivulet_core::constants::{TARGET_AIM_FACTOR, TARGET_MAX_FACTOR};
use serde::{Deserialize, Serialize};

/// Bounds a covering sum is judged against.
///
/// `min` is the amount itself, `aim` yields change equal to the payment, and
/// `max` is an exclusive ceiling on how far improvement may grow the sum.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetRange {
    pub min: u128,
    pub aim: u128,
    pub max: u128,
}

impl TargetRange {
    /// Bounds for `amount`: `{amount, 2 * amount, 3 * amount}`.
    pub fn for_amount(amount: u64) -> Self {
        let amount = amount as u128;
        Self {
            min: amount,
            aim: amount * TARGET_AIM_FACTOR,
            max: amount * TARGET_MAX_FACTOR,
        }
    }

    /// Whether `sum` pays the requested amount.
    pub fn is_covered_by(&self, sum: u128) -> bool {
        sum >= self.min
    }

    /// Distance of `sum` from the ideal covering sum.
    pub fn distance_from_aim(&self, sum: u128) -> u128 {
        self.aim.abs_diff(sum)
    }

    /// Whether growing `current` to `candidate` is an improvement: the
    /// candidate stays below `max` and is strictly closer to `aim`.
    pub fn improves(&self, current: u128, candidate: u128) -> bool {
        candidate < self.max
            && self.distance_from_aim(candidate) < self.distance_from_aim(current)
    }
}
