//! Error types for the Block Assembler

use shared_ledger::{CommitError, LedgerError};
use shared_types::{Classified, CodecError, ErrorKind, Hash, Stage};
use thiserror::Error;

/// Block Assembler failures.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// No references were collected for the slot.
    #[error("Nothing to assemble for slot {slot}")]
    NothingToAssemble {
        /// Target slot
        slot: u64,
    },

    /// More references than the configured maximum.
    #[error("Slot {slot} already holds the maximum of {max} references")]
    TooManyReferences {
        /// Target slot
        slot: u64,
        /// Configured maximum
        max: usize,
    },

    /// The parent header could not be read.
    #[error("Parent header unavailable for slot {slot}: {source}")]
    ParentUnavailable {
        /// Target slot
        slot: u64,
        /// Ledger failure
        #[source]
        source: LedgerError,
    },

    /// The build transaction reverted.
    #[error("Build for slot {slot} failed in 0x{}: {}", hex::encode(.tx_hash), .reason.as_deref().unwrap_or("reverted"))]
    BuildFailed {
        /// Target slot
        slot: u64,
        /// Build transaction
        tx_hash: Hash,
        /// Revert reason, when reported
        reason: Option<String>,
    },

    /// The bid event or its envelope did not decode.
    #[error("Malformed bid for slot {slot} in 0x{}: {source}", hex::encode(.tx_hash))]
    MalformedBid {
        /// Target slot
        slot: u64,
        /// Build transaction
        tx_hash: Hash,
        /// Decode failure
        #[source]
        source: CodecError,
    },

    /// The ledger client failed before a receipt was obtained.
    #[error("Ledger failure while building slot {slot}: {source}")]
    Ledger {
        /// Target slot
        slot: u64,
        /// Ledger failure
        #[source]
        source: LedgerError,
    },
}

impl AssembleError {
    /// Map a failed build call for `slot`.
    pub fn from_commit(slot: u64, err: CommitError) -> Self {
        match err {
            CommitError::Rejected { tx_hash, reason } => AssembleError::BuildFailed {
                slot,
                tx_hash,
                reason,
            },
            CommitError::Malformed { tx_hash, source } => AssembleError::MalformedBid {
                slot,
                tx_hash,
                source,
            },
            CommitError::Ledger(source) => AssembleError::Ledger { slot, source },
        }
    }

    /// Slot the failure belongs to.
    pub fn slot(&self) -> u64 {
        match self {
            AssembleError::NothingToAssemble { slot }
            | AssembleError::TooManyReferences { slot, .. }
            | AssembleError::ParentUnavailable { slot, .. }
            | AssembleError::BuildFailed { slot, .. }
            | AssembleError::MalformedBid { slot, .. }
            | AssembleError::Ledger { slot, .. } => *slot,
        }
    }
}

impl Classified for AssembleError {
    fn kind(&self) -> ErrorKind {
        match self {
            AssembleError::NothingToAssemble { .. } | AssembleError::TooManyReferences { .. } => {
                ErrorKind::InvalidInput
            }
            AssembleError::ParentUnavailable { .. } | AssembleError::Ledger { .. } => {
                ErrorKind::Ledger
            }
            AssembleError::BuildFailed { .. } => ErrorKind::RejectedCommit,
            AssembleError::MalformedBid { .. } => ErrorKind::MalformedResponse,
        }
    }

    fn stage(&self) -> Stage {
        Stage::BlockAssembler
    }
}
