//! Ports layer - Hexagonal architecture interfaces

pub mod inbound;

pub use inbound::BlockAssemblerApi;
