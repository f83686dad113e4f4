//! # Block Assembly Types
//!
//! Parent headers, build requests, the bid artifact and the envelope carried
//! inside a bid.

use crate::capability::{CapabilityGrant, RevealCondition};
use crate::codec::{self, keccak256};
use crate::entities::{Address, DataReference, Hash, SignedTransaction, U256};
use crate::errors::CodecError;
use serde::{Deserialize, Serialize};

/// Ledger block header as returned by `headerByNumber`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Block number
    pub number: u64,
    /// Block hash
    pub hash: Hash,
    /// Parent block hash
    pub parent_hash: Hash,
    /// Unix timestamp (seconds)
    pub timestamp: u64,
    /// Block gas limit
    pub gas_limit: u64,
    /// Extra data
    pub extra_data: Vec<u8>,
}

/// Arguments handed to the BlockBuilder contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildArgs {
    /// Slot being built
    pub slot: u64,
    /// Parent block hash
    pub parent_hash: Hash,
    /// Block timestamp
    pub timestamp: u64,
    /// Block gas limit
    pub gas_limit: u64,
    /// Extra data
    pub extra_data: Vec<u8>,
    /// Beneficiary of the assembled block
    pub fee_recipient: Address,
}

/// Everything the assembler submits for one slot attempt.
///
/// `ordered_references` fixes transaction inclusion order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRequest {
    /// Target slot
    pub target_slot: u64,
    /// Parent block hash
    pub parent_hash: Hash,
    /// Parent timestamp plus the slot interval
    pub timestamp: u64,
    /// Carried from the parent
    pub gas_limit: u64,
    /// Carried from the parent
    pub extra_data: Vec<u8>,
    /// Beneficiary of the assembled block
    pub fee_recipient: Address,
    /// Matched meta-bundles and standalone bundles, in inclusion order
    pub ordered_references: Vec<DataReference>,
}

impl BuildRequest {
    /// Derive a request from the parent header.
    pub fn from_parent(
        parent: &Header,
        target_slot: u64,
        slot_interval: u64,
        fee_recipient: Address,
        ordered_references: Vec<DataReference>,
    ) -> Self {
        Self {
            target_slot,
            parent_hash: parent.hash,
            timestamp: parent.timestamp + slot_interval,
            gas_limit: parent.gas_limit,
            extra_data: parent.extra_data.clone(),
            fee_recipient,
            ordered_references,
        }
    }

    /// Contract-facing build arguments.
    pub fn build_args(&self) -> BuildArgs {
        BuildArgs {
            slot: self.target_slot,
            parent_hash: self.parent_hash,
            timestamp: self.timestamp,
            gas_limit: self.gas_limit,
            extra_data: self.extra_data.clone(),
            fee_recipient: self.fee_recipient,
        }
    }
}

/// The assembled block carried inside a bid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEnvelope {
    /// Slot built
    pub slot: u64,
    /// Parent block hash
    pub parent_hash: Hash,
    /// Block timestamp
    pub timestamp: u64,
    /// Block gas limit
    pub gas_limit: u64,
    /// Sum of included gas limits
    pub gas_used: u64,
    /// Extra data
    pub extra_data: Vec<u8>,
    /// Beneficiary
    pub fee_recipient: Address,
    /// Expanded transactions in inclusion order
    pub transactions: Vec<SignedTransaction>,
    /// Total value paid to the fee recipient
    pub value: U256,
    /// Hash over every field above
    pub block_hash: Hash,
}

impl BlockEnvelope {
    /// Seal an envelope, computing its block hash.
    ///
    /// `gas_used` saturates at `u64::MAX`.
    pub fn seal(args: &BuildArgs, transactions: Vec<SignedTransaction>) -> Result<Self, CodecError> {
        let gas_used = transactions
            .iter()
            .fold(0u64, |acc, tx| acc.saturating_add(tx.gas_limit));
        let value = transactions
            .iter()
            .filter(|tx| tx.to == Some(args.fee_recipient))
            .fold(U256::zero(), |acc, tx| acc.saturating_add(tx.value));
        let mut envelope = Self {
            slot: args.slot,
            parent_hash: args.parent_hash,
            timestamp: args.timestamp,
            gas_limit: args.gas_limit,
            gas_used,
            extra_data: args.extra_data.clone(),
            fee_recipient: args.fee_recipient,
            transactions,
            value,
            block_hash: [0u8; 32],
        };
        envelope.block_hash = keccak256(&codec::encode(&envelope)?);
        Ok(envelope)
    }

    /// Envelope bytes as published in the bid event.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(self).map_err(|e| CodecError::Encode(e.to_string()))
    }

    /// Parse envelope bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }

    /// Hashes of the included transactions, in order.
    pub fn transaction_hashes(&self) -> Result<Vec<Hash>, CodecError> {
        self.transactions.iter().map(SignedTransaction::hash).collect()
    }
}

/// Terminal artifact of a successful build.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    /// Reference of the committed bid payload
    pub data_ref: DataReference,
    /// Visibility rules of the bid
    pub grant: CapabilityGrant,
    /// Opaque envelope bytes
    pub envelope: Vec<u8>,
}

impl Bid {
    /// Reveal condition of the bid payload.
    pub fn reveal_condition(&self) -> RevealCondition {
        self.grant.reveal_condition()
    }

    /// Decode the envelope.
    pub fn block(&self) -> Result<BlockEnvelope, CodecError> {
        BlockEnvelope::from_bytes(&self.envelope)
    }
}
