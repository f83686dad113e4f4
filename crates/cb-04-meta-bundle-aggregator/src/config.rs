//! Configuration for the Meta-Bundle Aggregator

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Aggregator configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Most children a meta-bundle may reference
    pub max_children: usize,
    /// Peekers added to every meta-bundle grant (the MetaBundle contract and
    /// the builder contract must read the payload later)
    pub extra_peekers: Vec<Address>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_children: 64,
            extra_peekers: Vec::new(),
        }
    }
}
