//! # CB-06: Block Assembler
//!
//! Turns an ordered list of matched meta-bundles and standalone bundles into
//! a builder bid for one slot.
//!
//! ## Slot lifecycle
//!
//! | State | Entered by | Holds |
//! |-------|------------|-------|
//! | `Collecting` | `SlotAssembly::new` | references |
//! | `Ordered` | `order` (parent header read) | `BuildRequest` |
//! | `Submitted` | `submit` | `BuildRequest` |
//! | `Confirmed` | `confirm` | `Bid` |
//! | `Rejected` | `reject` | `AssembleError` |
//!
//! ## Ordering
//!
//! References are built in the order given. A meta-bundle contributes its
//! children in committed order, a match contributes its meta-bundle and then
//! its payment. Building the same references twice yields the same
//! transaction order.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use config::AssemblerConfig;
pub use domain::{
    AssembleError, Collecting, Confirmed, Ordered, Rejected, SlotAssembly, SlotOutcome, Submitted,
};
pub use ports::BlockAssemblerApi;
pub use service::BlockAssembler;
