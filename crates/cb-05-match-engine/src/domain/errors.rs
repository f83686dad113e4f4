//! Error types for the Match Engine

use shared_ledger::CommitError;
use shared_types::{
    Classified, ClearingTerms, CodecError, DataReference, ErrorKind, PayloadKind, Stage,
};
use thiserror::Error;

/// Match Engine failures.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The meta-bundle reference was never committed.
    #[error("Unknown meta-bundle reference {data_ref}")]
    UnknownReference {
        /// Missing reference
        data_ref: DataReference,
    },

    /// The reference exists but is not a meta-bundle.
    #[error("{data_ref} is a {kind:?} payload, not a meta-bundle")]
    NotAMetaBundle {
        /// Offending reference
        data_ref: DataReference,
        /// Its payload kind
        kind: PayloadKind,
    },

    /// A payment bundle carries exactly one transaction.
    #[error("Payment bundle has {transactions} transactions, expected 1")]
    PaymentShape {
        /// Transactions in the payment bundle
        transactions: usize,
    },

    /// The payment does not satisfy the supplied clearing terms.
    #[error("Payment for {meta_bundle_ref} does not pay {} to 0x{}", .expected.value, hex::encode(.expected.recipient))]
    PaymentMismatch {
        /// Meta-bundle being matched
        meta_bundle_ref: DataReference,
        /// Terms the payment had to meet
        expected: ClearingTerms,
    },

    /// The payment could not be serialized.
    #[error("Payment does not encode: {0}")]
    Encoding(#[from] CodecError),

    /// The commit transaction failed.
    #[error("Match commit failed: {0}")]
    Commit(#[from] CommitError),
}

impl Classified for MatchError {
    fn kind(&self) -> ErrorKind {
        match self {
            MatchError::UnknownReference { .. } => ErrorKind::UnknownReference,
            MatchError::NotAMetaBundle { .. }
            | MatchError::PaymentShape { .. }
            | MatchError::PaymentMismatch { .. } => ErrorKind::InvalidInput,
            MatchError::Encoding(_) => ErrorKind::Internal,
            MatchError::Commit(err) => err.kind(),
        }
    }

    fn stage(&self) -> Stage {
        Stage::MatchEngine
    }
}
