//! Configuration for the Match Engine

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Match Engine configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Peekers added to every match grant (typically the builder contract)
    pub extra_peekers: Vec<Address>,
}
