//! Outbound Ports (Driven Ports / SPI)

/// Source of the current slot for reveal checks.
pub trait SlotSource: Send + Sync {
    /// Current slot.
    fn current_slot(&self) -> u64;
}
