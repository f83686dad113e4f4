//! # Domain Layer - Block Assembler
//!
//! - `errors`: `AssembleError`
//! - `slot`: the per-slot type-state machine

pub mod errors;
pub mod slot;

pub use errors::AssembleError;
pub use slot::{Collecting, Confirmed, Ordered, Rejected, SlotAssembly, SlotOutcome, Submitted};
