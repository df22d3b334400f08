//! Selection configuration.
//!
//! Provides [`SelectionConfig`], the stock [`SelectionOptions`]
//! implementation. It can be built programmatically or loaded from JSON;
//! missing fields fall back to their defaults.

use rivulet_core::constants::DEFAULT_MAX_INPUT_COUNT;
use rivulet_core::traits::SelectionOptions;
use rivulet_core::types::Selection;
use serde::{Deserialize, Serialize};

/// How the global input budget is derived from the number of outputs.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum MaxInputCount {
    /// The same cap regardless of the number of outputs.
    Fixed { count: usize },
    /// `base + per_output * outputs`, saturating.
    PerOutput { base: usize, per_output: usize },
}

impl MaxInputCount {
    pub fn for_outputs(&self, output_count: usize) -> usize {
        match *self {
            Self::Fixed { count } => count,
            Self::PerOutput { base, per_output } => {
                base.saturating_add(per_output.saturating_mul(output_count))
            }
        }
    }
}

impl Default for MaxInputCount {
    fn default() -> Self {
        Self::Fixed {
            count: DEFAULT_MAX_INPUT_COUNT,
        }
    }
}

/// Options for a selection run.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SelectionConfig {
    /// Input budget policy.
    pub max_input_count: MaxInputCount,
    /// Smallest acceptable change amount. Zero disables the check.
    pub dust_threshold: u64,
}

impl SelectionConfig {
    /// Parse a configuration from a JSON document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Config with a fixed input cap and no dust check.
    pub fn with_max_inputs(count: usize) -> Self {
        Self {
            max_input_count: MaxInputCount::Fixed { count },
            ..Self::default()
        }
    }
}

impl SelectionOptions for SelectionConfig {
    fn max_input_count(&self, output_count: usize) -> usize {
        self.max_input_count.for_outputs(output_count)
    }

    fn validate(&self, selection: &Selection) -> Result<(), String> {
        if self.dust_threshold == 0 {
            return Ok(());
        }
        match selection.change.iter().find(|&&c| c < self.dust_threshold) {
            Some(dust) => Err(format!(
                "change {dust} is below dust threshold {}",
                self.dust_threshold
            )),
            None => Ok(()),
        }
    }
}
