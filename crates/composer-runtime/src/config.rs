//! Runtime configuration and `CB_*` environment overrides.

use cb_02_settlement::SettlementConfig;
use cb_06_block_assembler::AssemblerConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Demo pipeline configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Devnet settings
    pub settlement: SettlementConfig,
    /// Block assembly settings; fee recipient and peekers are set per run
    pub assembler: AssemblerConfig,
    /// Hex private key of the funded account, generated when absent
    pub funded_key: Option<String>,
    /// Genesis balance of the funded account (wei)
    pub genesis_balance: u128,
    /// Amount given to every generated account (wei)
    pub account_funding: u128,
    /// Bundles sent per run
    pub bundle_count: usize,
    /// Transfers per bundle
    pub bundle_size: usize,
    /// Slot to target, the next block when absent
    pub target_slot: Option<u64>,
    /// Value the meta-bundle must clear (wei)
    pub clearing_value: u128,
    /// Log level name
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            settlement: SettlementConfig::default(),
            assembler: AssemblerConfig::default(),
            funded_key: None,
            genesis_balance: 1_000_000 * 10u128.pow(18),
            account_funding: 10u128.pow(18),
            bundle_count: 2,
            bundle_size: 2,
            target_slot: None,
            clearing_value: 1000,
            log_level: "info".to_string(),
        }
    }
}

/// Default configuration with overrides from the process environment.
pub fn load_config() -> RuntimeConfig {
    let mut config = RuntimeConfig::default();
    apply_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

/// Apply `CB_*` overrides looked up through `lookup`.
///
/// Unparseable values are logged and ignored.
pub fn apply_overrides(config: &mut RuntimeConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(key) = lookup("CB_FUNDED_KEY") {
        let digits = key.trim().trim_start_matches("0x");
        if digits.len() == 64 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            config.funded_key = Some(digits.to_string());
            info!("Loaded funded key from environment");
        } else {
            warn!("CB_FUNDED_KEY must be 32 bytes (64 hex chars)");
        }
    }

    if let Some(count) = lookup("CB_BUNDLE_COUNT") {
        match count.parse() {
            Ok(n) => config.bundle_count = n,
            Err(_) => warn!(value = %count, "Ignoring invalid CB_BUNDLE_COUNT"),
        }
    }
    if let Some(slot) = lookup("CB_TARGET_SLOT") {
        match slot.parse() {
            Ok(n) => config.target_slot = Some(n),
            Err(_) => warn!(value = %slot, "Ignoring invalid CB_TARGET_SLOT"),
        }
    }
    if let Some(level) = lookup("CB_LOG_LEVEL") {
        config.log_level = level;
    }
}
