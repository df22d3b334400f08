//! Shared test helpers for property and scenario tests.

use rivulet_core::pool::Pool;
use rivulet_core::traits::DrawSource;
use rivulet_core::types::{Entry, EntryId, Hash256, Output};

/// Simple destination hash from a seed byte.
pub fn dest(seed: u8) -> Hash256 {
    Hash256([seed; 32])
}

/// Entry with an identifier unique per `n`.
pub fn make_entry(n: u64, value: u64) -> Entry {
    let mut txid = [0u8; 32];
    txid[..8].copy_from_slice(&n.to_le_bytes());
    Entry::new(EntryId::new(Hash256(txid), n), value)
}

/// Pool holding one entry per value, identifiers numbered from zero.
pub fn make_pool(values: &[u64]) -> Pool {
    let entries = values
        .iter()
        .enumerate()
        .map(|(i, &v)| make_entry(i as u64, v))
        .collect();
    Pool::new(entries).expect("generated identifiers are unique")
}

/// One output per amount, destinations numbered from one.
pub fn make_outputs(amounts: &[u64]) -> Vec<Output> {
    amounts
        .iter()
        .enumerate()
        .map(|(i, &a)| Output::new(dest(i as u8 + 1), a))
        .collect()
}

/// Draw source replaying a fixed list of indices, wrapping each into range.
///
/// Once the script runs out it keeps returning 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedDraws {
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl DrawSource for ScriptedDraws {
    fn draw_index(&mut self, len: usize) -> usize {
        let raw = self.script.get(self.cursor).copied().unwrap_or(0);
        self.cursor += 1;
        raw % len
    }
}

/// Install a test-friendly tracing subscriber. Safe to call repeatedly.
///
/// Honours `RUST_LOG`; defaults to `warn`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
