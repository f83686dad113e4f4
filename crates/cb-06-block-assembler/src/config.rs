//! Configuration for the Block Assembler

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Assembler configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssemblerConfig {
    /// Seconds added to the parent timestamp
    pub slot_interval_secs: u64,
    /// Most references accepted for one slot
    pub max_references: usize,
    /// Beneficiary written into every build request
    pub fee_recipient: Address,
    /// Viewers of the bid
    pub allowed_peekers: Vec<Address>,
    /// Peekers added to every bid grant
    pub extra_peekers: Vec<Address>,
    /// Relay the bid is destined for, recorded in logs
    pub builder_endpoint: String,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            slot_interval_secs: 12,
            max_references: 256,
            fee_recipient: [0u8; 20],
            allowed_peekers: Vec::new(),
            extra_peekers: Vec::new(),
            builder_endpoint: "http://localhost:18550".to_string(),
        }
    }
}
