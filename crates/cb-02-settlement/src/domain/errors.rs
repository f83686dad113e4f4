//! # Error Types
//!
//! `ExecutionError` reverts a transaction: the nonce and fee are consumed, the
//! receipt carries status 0 and the error text as revert reason.
//! `AdmissionError` refuses a transaction before inclusion.

use cb_01_capability_store::StoreError;
use shared_types::{CodecError, DataReference, PayloadKind, U256};
use thiserror::Error;

/// Reasons a transaction reverts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// Gas limit below what execution needs.
    #[error("out of gas: required {required}, limit {limit}")]
    OutOfGas { required: u64, limit: u64 },

    /// Call data does not decode as a contract call.
    #[error("invalid call data: {0}")]
    InvalidCallData(CodecError),

    /// Creation code does not name a known contract.
    #[error("invalid creation code: {0}")]
    InvalidCreationCode(CodecError),

    /// The target contract has no such method.
    #[error("method {method} not found on {contract}")]
    MethodNotFound {
        method: &'static str,
        contract: &'static str,
    },

    /// Confidential inputs do not decode.
    #[error("invalid confidential inputs: {0}")]
    InvalidConfidentialInputs(CodecError),

    /// Bundle targets a different slot than the call.
    #[error("bundle targets slot {bundle_slot}, call targets {call_slot}")]
    SlotMismatch { bundle_slot: u64, call_slot: u64 },

    /// Bundle carries no transactions.
    #[error("empty bundle")]
    EmptyBundle,

    /// Meta-bundle has no children.
    #[error("meta-bundle has no children")]
    EmptyComposite,

    /// Meta-bundle payload disagrees with the call arguments.
    #[error("meta-bundle payload does not match call arguments")]
    MetaBundleMismatch,

    /// Referenced payload was never committed.
    #[error("unknown reference {0}")]
    UnknownReference(DataReference),

    /// Referenced payload has a kind the method cannot use.
    #[error("reference {data_ref} is a {kind:?} payload")]
    UnexpectedKind {
        data_ref: DataReference,
        kind: PayloadKind,
    },

    /// Payment does not pay the clearing value to the fee recipient.
    #[error("payment does not satisfy clearing terms: expected {expected_value} to 0x{}", hex::encode(.expected_recipient))]
    PaymentMismatch {
        expected_value: U256,
        expected_recipient: [u8; 20],
    },

    /// A stored payload does not decode as its kind.
    #[error("corrupt payload {data_ref}: {source}")]
    CorruptPayload {
        data_ref: DataReference,
        source: CodecError,
    },

    /// Build call without references.
    #[error("no references to build")]
    NothingToBuild,

    /// Build arguments name a different slot than the call.
    #[error("build arguments target slot {args_slot}, call targets {call_slot}")]
    BuildSlotMismatch { args_slot: u64, call_slot: u64 },

    /// Expanded transactions exceed the block gas limit.
    #[error("block gas {used} exceeds limit {limit}")]
    BlockGasExceeded { used: u64, limit: u64 },

    /// Meta-bundles nest deeper than the builder expands.
    #[error("reference {data_ref} nests deeper than {max} levels")]
    NestingTooDeep { data_ref: DataReference, max: usize },

    /// The same transaction appears twice in the expanded block.
    #[error("duplicate transaction 0x{} in block", hex::encode(.0))]
    DuplicateTransaction([u8; 32]),

    /// The contract could not read a payload it needs.
    #[error("confidential store: {0}")]
    Store(#[from] StoreError),

    /// Encoding an output failed.
    #[error("encoding failed: {0}")]
    Encoding(CodecError),
}

/// Reasons a transaction is refused before inclusion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    /// Signature does not recover to any sender.
    #[error("invalid signature")]
    InvalidSignature,

    /// Nonce is not the sender's next nonce.
    #[error("nonce mismatch for 0x{}: expected {expected}, got {actual}", hex::encode(.sender))]
    NonceMismatch {
        sender: [u8; 20],
        expected: u64,
        actual: u64,
    },

    /// Sender cannot cover value plus maximum fee.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: U256, available: U256 },

    /// Gas limit above the block gas limit.
    #[error("gas limit {gas} exceeds block gas limit {limit}")]
    GasLimitTooHigh { gas: u64, limit: u64 },

    /// Gas limit below intrinsic gas.
    #[error("intrinsic gas too low: required {required}, limit {limit}")]
    IntrinsicGasTooLow { required: u64, limit: u64 },

    /// Transaction could not be hashed.
    #[error("unhashable transaction: {0}")]
    Codec(CodecError),
}
