//! Ports layer - Hexagonal architecture interfaces

pub mod inbound;
pub mod outbound;

pub use inbound::{CapabilityStoreApi, ReferenceDirectory};
pub use outbound::SlotSource;
