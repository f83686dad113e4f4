//! Error types for the Bundle Submitter

use shared_ledger::CommitError;
use shared_types::{Classified, CodecError, ErrorKind, Stage};
use thiserror::Error;

/// Why a bundle was refused before any transaction was sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidBundle {
    /// No transactions.
    #[error("bundle is empty")]
    Empty,

    /// More transactions than the configured maximum.
    #[error("bundle has {size} transactions, maximum is {max}")]
    TooLarge {
        /// Transactions in the bundle
        size: usize,
        /// Configured maximum
        max: usize,
    },

    /// A transaction signature is structurally invalid.
    #[error("transaction {index} has a malformed signature")]
    MalformedSignature {
        /// Position in the bundle
        index: usize,
    },

    /// The grant reveals at a different slot than the bundle targets.
    #[error("bundle targets slot {target_slot} but grant reveals at {reveal_condition}")]
    SlotMismatch {
        /// Bundle target slot
        target_slot: u64,
        /// Grant reveal slot
        reveal_condition: u64,
    },

    /// The bundle could not be serialized.
    #[error("bundle does not encode: {0}")]
    Encoding(CodecError),
}

/// Bundle Submitter failures.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Validation failed; nothing was sent.
    #[error("Invalid bundle for slot {target_slot}: {reason}")]
    InvalidBundle {
        /// Bundle target slot
        target_slot: u64,
        /// What was wrong
        reason: InvalidBundle,
    },

    /// The commit transaction failed.
    #[error("Bundle commit failed: {0}")]
    Commit(#[from] CommitError),
}

impl Classified for SubmitError {
    fn kind(&self) -> ErrorKind {
        match self {
            SubmitError::InvalidBundle { .. } => ErrorKind::InvalidInput,
            SubmitError::Commit(err) => err.kind(),
        }
    }

    fn stage(&self) -> Stage {
        Stage::BundleSubmitter
    }
}
