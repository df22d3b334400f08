//! Core selection types: entries, requested outputs, and selections.
//!
//! A single value is a `u64` in the currency's smallest unit. Sums of values
//! are `u128` so that totals never overflow, even for pools holding values
//! near [`MAX_COIN_VALUE`](crate::constants::MAX_COIN_VALUE).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte hash value.
///
/// Used for the transaction half of an [`EntryId`] and for output
/// destinations.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// The zero hash (32 zero bytes).
    pub const ZERO: Self = Self([0u8; 32]);

    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Identifier of a spendable entry: the producing transaction and the output
/// index within it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId {
    /// Transaction that created the entry.
    pub txid: Hash256,
    /// Output index within that transaction.
    pub index: u64,
}

impl EntryId {
    pub fn new(txid: Hash256, index: u64) -> Self {
        Self { txid, index }
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.index)
    }
}

/// One spendable item of the pool.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Entry {
    pub id: EntryId,
    /// Value in the smallest currency unit.
    pub value: u64,
}

impl Entry {
    pub fn new(id: EntryId, value: u64) -> Self {
        Self { id, value }
    }
}

/// Sum of entry values, widened so it cannot overflow.
pub fn sum_values<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> u128 {
    entries.into_iter().map(|e| e.value as u128).sum()
}

/// A payment the selection must cover.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Output {
    /// Recipient of the payment.
    pub destination: Hash256,
    /// Requested amount in the smallest currency unit.
    pub amount: u64,
}

impl Output {
    pub fn new(destination: Hash256, amount: u64) -> Self {
        Self {
            destination,
            amount,
        }
    }
}

/// Sum of requested amounts.
pub fn sum_amounts<'a>(outputs: impl IntoIterator<Item = &'a Output>) -> u128 {
    outputs.into_iter().map(|o| o.amount as u128).sum()
}

/// Accumulated result of a selection run.
///
/// Built one output at a time through [`Selection::append`]; entries for
/// each output are appended in the order they were chosen.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    /// Entries consumed by the selection.
    pub inputs: Vec<Entry>,
    /// Requested outputs covered by the selection.
    pub outputs: Vec<Output>,
    /// Change amounts returned to the spender.
    pub change: Vec<u64>,
}

impl Selection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the contribution made for one output.
    pub fn append(&mut self, inputs: Vec<Entry>, output: Output, change: Vec<u64>) {
        self.inputs.extend(inputs);
        self.outputs.push(output);
        self.change.extend(change);
    }

    /// Sum of all consumed entry values.
    pub fn total_input(&self) -> u128 {
        sum_values(&self.inputs)
    }

    /// Sum of all covered output amounts.
    pub fn total_output(&self) -> u128 {
        sum_amounts(&self.outputs)
    }

    /// Sum of all change amounts.
    pub fn total_change(&self) -> u128 {
        self.change.iter().map(|&c| c as u128).sum()
    }

    /// Whether nothing has been selected yet.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty() && self.change.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(seed: u8, value: u64) -> Entry {
        Entry::new(EntryId::new(Hash256([seed; 32]), 0), value)
    }

    #[test]
    fn hash_display_is_hex() {
        let h = Hash256([0xab; 32]);
        assert_eq!(h.to_string(), "ab".repeat(32));
        assert!(Hash256::ZERO.is_zero());
        assert!(!h.is_zero());
    }

    #[test]
    fn entry_id_display() {
        let id = EntryId::new(Hash256([0x01; 32]), 7);
        assert_eq!(id.to_string(), format!("{}:7", "01".repeat(32)));
    }

    #[test]
    fn sums_do_not_overflow() {
        let entries = vec![entry(1, u64::MAX), entry(2, u64::MAX)];
        assert_eq!(sum_values(&entries), 2 * u64::MAX as u128);
    }

    #[test]
    fn append_accumulates_in_order() {
        let mut selection = Selection::new();
        assert!(selection.is_empty());

        let out_a = Output::new(Hash256([0xAA; 32]), 10);
        let out_b = Output::new(Hash256([0xBB; 32]), 5);
        selection.append(vec![entry(1, 12)], out_a, vec![2]);
        selection.append(vec![entry(2, 3), entry(3, 4)], out_b, vec![2]);

        assert_eq!(selection.inputs.len(), 3);
        assert_eq!(selection.outputs, vec![out_a, out_b]);
        assert_eq!(selection.total_input(), 19);
        assert_eq!(selection.total_output(), 15);
        assert_eq!(selection.total_change(), 4);
        assert!(!selection.is_empty());
    }

    #[test]
    fn selection_serde_roundtrip() {
        let mut selection = Selection::new();
        selection.append(vec![entry(9, 40)], Output::new(Hash256::ZERO, 30), vec![10]);
        let json = serde_json::to_string(&selection).unwrap();
        let back: Selection = serde_json::from_str(&json).unwrap();
        assert_eq!(selection, back);
    }
}
