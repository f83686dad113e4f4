//! Ledger and commit error types.

use shared_crypto::CryptoError;
use shared_types::{Address, CodecError, ErrorKind, Hash, U256};
use thiserror::Error;

/// Failures of the ledger client itself.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ledger refused the transaction before inclusion.
    #[error("Transaction refused by ledger: {reason}")]
    TransactionRefused {
        /// Ledger-supplied reason
        reason: String,
    },

    /// No receipt exists for the hash.
    #[error("Receipt not found for 0x{}", hex::encode(.tx_hash))]
    ReceiptNotFound {
        /// Transaction hash
        tx_hash: Hash,
    },

    /// No header exists at the requested height.
    #[error("Header not found: {number}")]
    HeaderNotFound {
        /// Requested height
        number: u64,
    },

    /// The signing key does not belong to the actor.
    #[error("Key for 0x{} cannot sign for actor 0x{}", hex::encode(.key), hex::encode(.actor))]
    IdentityMismatch {
        /// Address of the key
        key: Address,
        /// Identity of the actor
        actor: Address,
    },

    /// Funding transfer landed but the balance does not match.
    #[error("Funding mismatch for 0x{}: expected {expected}, found {actual}", hex::encode(.account))]
    FundingMismatch {
        /// Funded account
        account: Address,
        /// Amount sent
        expected: U256,
        /// Balance observed
        actual: U256,
    },

    /// A transfer or deployment reverted.
    #[error("Transaction 0x{} reverted", hex::encode(.tx_hash))]
    Reverted {
        /// Transaction hash
        tx_hash: Hash,
    },

    /// A successful deployment receipt carried no contract address.
    #[error("Deployment 0x{} produced no contract address", hex::encode(.tx_hash))]
    MissingContractAddress {
        /// Transaction hash
        tx_hash: Hash,
    },

    /// Signing failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Encoding failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Failures of a contract call made on behalf of a stage.
#[derive(Debug, Error)]
pub enum CommitError {
    /// The call was included and reverted (status 0).
    #[error("Commit 0x{} rejected by settlement: {}", hex::encode(.tx_hash), .reason.as_deref().unwrap_or("reverted"))]
    Rejected {
        /// Transaction hash
        tx_hash: Hash,
        /// Revert reason, when reported
        reason: Option<String>,
    },

    /// The call succeeded but its receipt did not carry the expected event.
    #[error("Malformed receipt for 0x{}: {source}", hex::encode(.tx_hash))]
    Malformed {
        /// Transaction hash
        tx_hash: Hash,
        /// Decode failure
        #[source]
        source: CodecError,
    },

    /// The ledger client failed before a receipt was obtained.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl CommitError {
    /// Taxonomy class of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommitError::Rejected { .. } => ErrorKind::RejectedCommit,
            CommitError::Malformed { .. } => ErrorKind::MalformedResponse,
            CommitError::Ledger(_) => ErrorKind::Ledger,
        }
    }

    /// Transaction hash, when the call reached the ledger.
    pub fn tx_hash(&self) -> Option<Hash> {
        match self {
            CommitError::Rejected { tx_hash, .. } | CommitError::Malformed { tx_hash, .. } => {
                Some(*tx_hash)
            }
            CommitError::Ledger(_) => None,
        }
    }
}
