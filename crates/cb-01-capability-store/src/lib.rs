//! # CB-01: Capability Store
//!
//! Holds confidential payloads keyed by opaque 128-bit [`DataReference`]s.
//!
//! ## Access Rule
//!
//! ```text
//! resolve(ref, requester) succeeds  ⇔  requester ∈ viewers ∧ slot ≥ reveal_condition
//! ```
//!
//! Membership is checked first, so a stranger gets `AccessDenied` even
//! before the reveal slot.
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | References never reused | `service.rs` - redraw while the key is taken |
//! | Payloads immutable | entries are only ever inserted |
//! | Every commit announced | `commit*` publish on the hint bus |
//!
//! [`DataReference`]: shared_types::DataReference

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::ManualSlotClock;
pub use domain::{StoreError, StoredPayload};
pub use ports::{CapabilityStoreApi, ReferenceDirectory, SlotSource};
pub use service::CapabilityStore;
