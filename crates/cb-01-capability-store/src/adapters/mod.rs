//! Adapters layer

pub mod clock;

pub use clock::ManualSlotClock;
