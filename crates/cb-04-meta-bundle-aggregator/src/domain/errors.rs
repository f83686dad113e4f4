//! Error types for the Meta-Bundle Aggregator

use shared_crypto::CryptoError;
use shared_ledger::CommitError;
use shared_types::{Classified, CodecError, DataReference, ErrorKind, Stage};
use thiserror::Error;

/// Meta-Bundle Aggregator failures.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// No children were given. Nothing was committed or announced.
    #[error("Meta-bundle has no children")]
    EmptyComposite,

    /// More children than the configured maximum.
    #[error("Meta-bundle has {count} children, maximum is {max}")]
    TooManyChildren {
        /// Children given
        count: usize,
        /// Configured maximum
        max: usize,
    },

    /// A child was never committed.
    #[error("Unknown child reference {data_ref}")]
    UnknownReference {
        /// Missing child
        data_ref: DataReference,
    },

    /// The confidential payload could not be built.
    #[error("Meta-bundle payload does not encode: {0}")]
    Encoding(#[from] CodecError),

    /// The placeholder could not be signed.
    #[error("Placeholder signing failed: {0}")]
    Signing(#[from] CryptoError),

    /// The commit transaction failed.
    #[error("Meta-bundle commit failed: {0}")]
    Commit(#[from] CommitError),
}

impl Classified for AggregateError {
    fn kind(&self) -> ErrorKind {
        match self {
            AggregateError::EmptyComposite | AggregateError::TooManyChildren { .. } => {
                ErrorKind::InvalidInput
            }
            AggregateError::UnknownReference { .. } => ErrorKind::UnknownReference,
            AggregateError::Encoding(_) | AggregateError::Signing(_) => ErrorKind::Internal,
            AggregateError::Commit(err) => err.kind(),
        }
    }

    fn stage(&self) -> Stage {
        Stage::MetaBundleAggregator
    }
}
