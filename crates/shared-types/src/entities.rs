//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `Actor`, `DataReference`
//! - **Transactions**: `TransactionRequest`, `UnsignedTransaction`, `SignedTransaction`
//! - **Orders**: `Bundle`, `MetaBundle`, `MatchRecord`, `ClearingTerms`

use crate::codec::{self, keccak256};
use crate::errors::CodecError;
use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

/// A 32-byte keccak hash.
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// Gas consumed by a plain value transfer.
pub const TRANSFER_GAS: u64 = 21_000;

// =============================================================================
// IDENTITY
// =============================================================================

/// Opaque 128-bit handle to a committed confidential payload.
///
/// Issued once by the Capability Store and never reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataReference(pub [u8; 16]);

impl DataReference {
    /// Draw a fresh random reference (UUID v4 bits).
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().into_bytes())
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for DataReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for DataReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataReference({self})")
    }
}

/// A signing identity and the next nonce it will use.
///
/// Actors are plain values. Signing consumes one and hands back the
/// incremented copy; nothing else mutates the counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Address of the signer.
    pub identity: Address,
    /// Nonce for the next transaction.
    pub nonce: u64,
}

impl Actor {
    /// Actor starting at `nonce`.
    pub fn new(identity: Address, nonce: u64) -> Self {
        Self { identity, nonce }
    }

    /// Copy with the nonce advanced by one.
    #[must_use]
    pub fn advanced(self) -> Self {
        Self {
            identity: self.identity,
            nonce: self.nonce + 1,
        }
    }
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

/// Recoverable ECDSA signature (r, s, v) with v in {0, 1}.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxSignature {
    /// R component
    pub r: [u8; 32],
    /// S component
    pub s: [u8; 32],
    /// Recovery id
    pub v: u8,
}

/// A legacy-style transaction as the caller describes it.
///
/// Gas price and gas limit may be left empty; transaction preparation fills
/// them from the ledger. The nonce always comes from the signing [`Actor`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Recipient (None deploys a contract)
    pub to: Option<Address>,
    /// Value transferred
    pub value: U256,
    /// Gas price, suggested by the ledger when absent
    pub gas_price: Option<U256>,
    /// Gas limit, estimated by the ledger when absent
    pub gas: Option<u64>,
    /// Call data
    pub data: Vec<u8>,
}

impl TransactionRequest {
    /// Value transfer to `to`.
    pub fn transfer(to: Address, value: U256) -> Self {
        Self {
            to: Some(to),
            value,
            ..Default::default()
        }
    }

    /// Call into the contract at `to` with `data`.
    pub fn call(to: Address, data: Vec<u8>) -> Self {
        Self {
            to: Some(to),
            data,
            ..Default::default()
        }
    }

    /// Contract creation carrying `code`.
    pub fn deploy(code: Vec<u8>) -> Self {
        Self {
            to: None,
            data: code,
            ..Default::default()
        }
    }

    /// Pin the gas limit.
    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = Some(gas);
        self
    }

    /// Pin the gas price.
    pub fn with_gas_price(mut self, gas_price: U256) -> Self {
        self.gas_price = Some(gas_price);
        self
    }
}

/// Fully specified transaction awaiting a signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    /// Sender nonce
    pub nonce: u64,
    /// Recipient (None deploys a contract)
    pub to: Option<Address>,
    /// Value transferred
    pub value: U256,
    /// Gas price
    pub gas_price: U256,
    /// Gas limit
    pub gas_limit: u64,
    /// Call data
    pub data: Vec<u8>,
}

impl UnsignedTransaction {
    /// Hash that gets signed.
    pub fn signing_hash(&self) -> Result<Hash, CodecError> {
        Ok(keccak256(&codec::encode(self)?))
    }

    /// Attach a signature.
    pub fn into_signed(self, signature: TxSignature) -> SignedTransaction {
        SignedTransaction {
            nonce: self.nonce,
            to: self.to,
            value: self.value,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            data: self.data,
            signature,
        }
    }
}

/// A signed transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// Sender nonce
    pub nonce: u64,
    /// Recipient (None deploys a contract)
    pub to: Option<Address>,
    /// Value transferred
    pub value: U256,
    /// Gas price
    pub gas_price: U256,
    /// Gas limit
    pub gas_limit: u64,
    /// Call data
    pub data: Vec<u8>,
    /// Recoverable signature over [`UnsignedTransaction::signing_hash`]
    pub signature: TxSignature,
}

impl SignedTransaction {
    /// The unsigned body, for recomputing the signing hash.
    pub fn unsigned(&self) -> UnsignedTransaction {
        UnsignedTransaction {
            nonce: self.nonce,
            to: self.to,
            value: self.value,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            data: self.data.clone(),
        }
    }

    /// Transaction hash (covers the signature).
    pub fn hash(&self) -> Result<Hash, CodecError> {
        Ok(keccak256(&codec::encode(self)?))
    }

    /// Whether the signature scalars are non-zero and v is a recovery id.
    ///
    /// Structural check only; recovery happens in `shared-crypto`.
    pub fn has_well_formed_signature(&self) -> bool {
        self.signature.r != [0u8; 32] && self.signature.s != [0u8; 32] && self.signature.v <= 1
    }
}

// =============================================================================
// ORDERS
// =============================================================================

/// Ordered, non-empty set of signed transactions aimed at one slot.
///
/// Serialized as JSON `{"blockNumber": .., "txs": [..]}` when committed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    /// Slot the bundle targets
    #[serde(rename = "blockNumber")]
    pub target_slot: u64,
    /// Transactions in inclusion order
    #[serde(rename = "txs")]
    pub transactions: Vec<SignedTransaction>,
}

impl Bundle {
    /// Create a bundle. Validation happens at the Submitter.
    pub fn new(target_slot: u64, transactions: Vec<SignedTransaction>) -> Self {
        Self {
            target_slot,
            transactions,
        }
    }

    /// Confidential payload bytes.
    pub fn to_payload(&self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(self).map_err(|e| CodecError::Encode(e.to_string()))
    }

    /// Parse a confidential payload.
    pub fn from_payload(bytes: &[u8]) -> Result<Self, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// True when the bundle carries no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum of gas limits.
    pub fn total_gas(&self) -> u64 {
        self.transactions.iter().map(|tx| tx.gas_limit).sum()
    }
}

/// Composite order over previously committed references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaBundle {
    /// Children in expansion order
    #[serde(rename = "bundleIds")]
    pub child_references: Vec<DataReference>,
    /// Amount the clearing payment must carry
    #[serde(rename = "value")]
    pub clearing_value: U256,
    /// Recipient of the clearing payment
    #[serde(rename = "feeRecipient")]
    pub fee_recipient: Address,
}

impl MetaBundle {
    /// Clearing terms a payment has to satisfy.
    pub fn clearing_terms(&self) -> ClearingTerms {
        ClearingTerms {
            value: self.clearing_value,
            recipient: self.fee_recipient,
        }
    }
}

/// Confidential payload of a meta-bundle commit.
///
/// `placeholder` keeps the payload transaction-shaped for consumers that only
/// understand bundles. It is never expanded into a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaBundlePayload {
    /// Structured composite order
    pub meta_bundle: MetaBundle,
    /// Synthetic payment, no economic effect
    pub placeholder: Bundle,
}

impl MetaBundlePayload {
    /// Confidential payload bytes.
    pub fn to_payload(&self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(self).map_err(|e| CodecError::Encode(e.to_string()))
    }

    /// Parse a confidential payload.
    pub fn from_payload(bytes: &[u8]) -> Result<Self, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

/// Binding of a meta-bundle to its clearing payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// The matched meta-bundle
    pub meta_bundle_ref: DataReference,
    /// The committed payment bundle
    pub payment_ref: DataReference,
}

impl MatchRecord {
    /// Confidential payload bytes.
    pub fn to_payload(&self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(self).map_err(|e| CodecError::Encode(e.to_string()))
    }

    /// Parse a confidential payload.
    pub fn from_payload(bytes: &[u8]) -> Result<Self, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

/// Value and recipient a clearing payment must carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearingTerms {
    /// Payment value
    pub value: U256,
    /// Payment recipient
    pub recipient: Address,
}

impl ClearingTerms {
    /// Whether `bundle` is a single transfer satisfying these terms.
    pub fn is_satisfied_by(&self, bundle: &Bundle) -> bool {
        match bundle.transactions.as_slice() {
            [payment] => payment.value == self.value && payment.to == Some(self.recipient),
            _ => false,
        }
    }
}
