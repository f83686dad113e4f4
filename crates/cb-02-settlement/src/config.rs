//! Configuration for the devnet settlement ledger

use serde::{Deserialize, Serialize};

/// Devnet configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettlementConfig {
    /// Chain identifier, reported in logs
    pub chain_id: u64,
    /// Genesis block timestamp (seconds)
    pub genesis_timestamp: u64,
    /// Seconds between consecutive blocks
    pub slot_interval_secs: u64,
    /// Gas limit of every block
    pub block_gas_limit: u64,
    /// Gas price returned by `suggest_gas_price`
    pub base_gas_price: u64,
    /// Extra data stamped into every header
    pub extra_data: String,
    /// Execution gas charged for a contract call on top of intrinsic gas
    pub contract_execution_gas: u64,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            chain_id: 16_813_125,
            genesis_timestamp: 1_700_000_000,
            slot_interval_secs: 12,
            block_gas_limit: 30_000_000,
            base_gas_price: 1_000_000_000,
            extra_data: "composable-block".to_string(),
            contract_execution_gas: 200_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SettlementConfig::default();
        assert_eq!(config.slot_interval_secs, 12);
        assert_eq!(config.block_gas_limit, 30_000_000);
        assert!(config.contract_execution_gas < config.block_gas_limit);
    }
}
