//! Configuration for the Bundle Submitter

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Submitter configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitterConfig {
    /// Largest bundle accepted, in transactions
    pub max_bundle_size: usize,
    /// Peekers added to every bundle grant (typically the builder contract)
    pub extra_peekers: Vec<Address>,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            max_bundle_size: 100,
            extra_peekers: Vec::new(),
        }
    }
}
