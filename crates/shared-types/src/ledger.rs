//! # Ledger Wire Types
//!
//! Shapes exchanged with the ledger client: logs, receipts, gas-estimation
//! messages and confidential compute requests. The core inspects nothing
//! beyond these fields.

use crate::entities::{Address, Hash, SignedTransaction, U256};
use crate::errors::CodecError;
use serde::{Deserialize, Serialize};

/// Receipt status of a reverted transaction.
pub const RECEIPT_STATUS_FAILED: u64 = 0;

/// Receipt status of an accepted transaction.
pub const RECEIPT_STATUS_SUCCESS: u64 = 1;

/// Event log emitted during execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    /// Emitting contract
    pub address: Address,
    /// Topics; topic 0 identifies the event
    pub topics: Vec<Hash>,
    /// Positionally encoded event fields
    pub data: Vec<u8>,
}

/// Transaction receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Transaction hash
    pub tx_hash: Hash,
    /// 1 on success, 0 on revert
    pub status: u64,
    /// Logs emitted (empty on revert)
    pub logs: Vec<Log>,
    /// Address of a created contract
    pub contract_address: Option<Address>,
    /// Block that included the transaction
    pub block_number: u64,
    /// Gas charged
    pub gas_used: u64,
    /// Revert reason, when the ledger reports one
    pub revert_reason: Option<String>,
}

impl Receipt {
    /// Non-zero status is the only success signal.
    pub fn is_success(&self) -> bool {
        self.status != RECEIPT_STATUS_FAILED
    }
}

/// Message for gas estimation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallMsg {
    /// Sender
    pub from: Address,
    /// Recipient
    pub to: Option<Address>,
    /// Gas price
    pub gas_price: Option<U256>,
    /// Value
    pub value: U256,
    /// Call data
    pub data: Vec<u8>,
}

/// Signed transaction plus the confidential inputs it carries.
///
/// Confidential inputs reach the executing contract but never appear in
/// receipts or public state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidentialComputeRequest {
    /// Public signed transaction
    pub transaction: SignedTransaction,
    /// Private inputs for the contract
    pub confidential_inputs: Vec<u8>,
}

impl ConfidentialComputeRequest {
    /// Request without confidential inputs.
    pub fn public(transaction: SignedTransaction) -> Self {
        Self {
            transaction,
            confidential_inputs: Vec::new(),
        }
    }

    /// Hash of the public transaction.
    pub fn hash(&self) -> Result<Hash, CodecError> {
        self.transaction.hash()
    }
}
