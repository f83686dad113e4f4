//! Error types for the Capability Store

use shared_types::{Address, Classified, DataReference, ErrorKind, Stage};
use thiserror::Error;

/// Resolve and commit failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Requester is not a viewer of the payload.
    #[error("Access to {data_ref} denied for 0x{}", hex::encode(.requester))]
    AccessDenied {
        /// Payload reference
        data_ref: DataReference,
        /// Rejected requester
        requester: Address,
    },

    /// Requester is a viewer but the reveal slot has not arrived.
    #[error("{data_ref} not revealable before slot {reveal_condition} (current {current_slot})")]
    NotYetRevealable {
        /// Payload reference
        data_ref: DataReference,
        /// Reveal slot
        reveal_condition: u64,
        /// Slot at which access was attempted
        current_slot: u64,
    },

    /// No payload was ever committed under the reference.
    #[error("Unknown reference {data_ref}")]
    UnknownReference {
        /// Payload reference
        data_ref: DataReference,
    },
}

impl StoreError {
    /// Reference involved in the failure.
    pub fn data_ref(&self) -> DataReference {
        match self {
            StoreError::AccessDenied { data_ref, .. }
            | StoreError::NotYetRevealable { data_ref, .. }
            | StoreError::UnknownReference { data_ref } => *data_ref,
        }
    }
}

impl Classified for StoreError {
    fn kind(&self) -> ErrorKind {
        match self {
            StoreError::AccessDenied { .. } => ErrorKind::AccessDenied,
            StoreError::NotYetRevealable { .. } => ErrorKind::NotYetRevealable,
            StoreError::UnknownReference { .. } => ErrorKind::UnknownReference,
        }
    }

    fn stage(&self) -> Stage {
        Stage::CapabilityStore
    }
}
