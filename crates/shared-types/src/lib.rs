//! # Shared Types Crate
//!
//! Every entity that crosses a pipeline stage boundary lives here.
//!
//! ## Design Principles
//!
//! - **By Reference Only**: Later stages hold earlier outputs as
//!   [`DataReference`] handles, never as payload values.
//! - **Fixed Grants**: A [`CapabilityGrant`] is fixed at commit time. The only
//!   derivation offered is an additive union.
//! - **Positional Events**: Contract events are encoded and decoded field by
//!   field in declaration order (see [`codec`]).

pub mod block;
pub mod capability;
pub mod codec;
pub mod contracts;
pub mod entities;
pub mod errors;
pub mod ledger;

pub use block::*;
pub use capability::*;
pub use codec::keccak256;
pub use contracts::*;
pub use entities::*;
pub use errors::*;
pub use ledger::*;
