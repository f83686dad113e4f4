//! Wiring of a complete in-process network: hint bus, slot clock,
//! Capability Store and ledger.

use crate::config::SettlementConfig;
use crate::service::DevnetLedger;
use cb_01_capability_store::{CapabilityStore, ManualSlotClock};
use shared_bus::InMemoryEventBus;
use shared_ledger::LedgerClient;
use std::sync::Arc;

/// A running devnet.
#[derive(Clone)]
pub struct Devnet {
    /// Public hint bus
    pub bus: Arc<InMemoryEventBus>,
    /// Slot clock, advanced by block sealing
    pub clock: Arc<ManualSlotClock>,
    /// Confidential store the contracts commit into
    pub store: Arc<CapabilityStore>,
    /// Settlement ledger
    pub ledger: Arc<DevnetLedger>,
}

impl Devnet {
    /// Start a devnet at genesis.
    pub fn start(config: SettlementConfig) -> Self {
        let bus = Arc::new(InMemoryEventBus::new());
        let clock = Arc::new(ManualSlotClock::new(0));
        let store = Arc::new(CapabilityStore::new(clock.clone(), bus.clone()));
        let ledger = Arc::new(DevnetLedger::new(config, store.clone(), clock.clone()));
        Self {
            bus,
            clock,
            store,
            ledger,
        }
    }

    /// The ledger behind the client port.
    pub fn client(&self) -> Arc<dyn LedgerClient> {
        self.ledger.clone()
    }
}
