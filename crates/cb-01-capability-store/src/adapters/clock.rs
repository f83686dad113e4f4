//! Manually advanced slot clock.

use crate::ports::SlotSource;
use std::sync::atomic::{AtomicU64, Ordering};

/// Slot counter advanced by its owner, usually the ledger sealing blocks.
#[derive(Debug, Default)]
pub struct ManualSlotClock {
    slot: AtomicU64,
}

impl ManualSlotClock {
    /// Clock starting at `slot`.
    pub fn new(slot: u64) -> Self {
        Self {
            slot: AtomicU64::new(slot),
        }
    }

    /// Move to `slot`. Clocks never go backwards.
    pub fn advance_to(&self, slot: u64) {
        self.slot.fetch_max(slot, Ordering::SeqCst);
    }

    /// Move forward by one slot, returning the new slot.
    pub fn tick(&self) -> u64 {
        self.slot.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl SlotSource for ManualSlotClock {
    fn current_slot(&self) -> u64 {
        self.slot.load(Ordering::SeqCst)
    }
}
