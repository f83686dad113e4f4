//! Outbound port to the settlement ledger.

use crate::errors::LedgerError;
use async_trait::async_trait;
use shared_types::{Address, CallMsg, ConfidentialComputeRequest, Hash, Header, Receipt, U256};

/// Port: Settlement ledger client
///
/// The pipeline treats submit-then-wait as opaque. Timeouts, if any, belong
/// to the implementation.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Submit a signed transaction with its confidential inputs.
    async fn send_transaction(
        &self,
        request: ConfidentialComputeRequest,
    ) -> Result<Hash, LedgerError>;

    /// Block until the transaction's receipt is available.
    async fn wait_for_receipt(&self, tx_hash: Hash) -> Result<Receipt, LedgerError>;

    /// Balance of `address` at `block` (latest when `None`).
    async fn balance_at(&self, address: Address, block: Option<u64>) -> Result<U256, LedgerError>;

    /// Gas price the ledger currently suggests.
    async fn suggest_gas_price(&self) -> Result<U256, LedgerError>;

    /// Gas needed to execute `msg`.
    async fn estimate_gas(&self, msg: CallMsg) -> Result<u64, LedgerError>;

    /// Next nonce the ledger expects from `address`.
    async fn pending_nonce_at(&self, address: Address) -> Result<u64, LedgerError>;

    /// Header at `number` (latest when `None`).
    async fn header_by_number(&self, number: Option<u64>) -> Result<Header, LedgerError>;
}
