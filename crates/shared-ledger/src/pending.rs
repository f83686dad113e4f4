//! Handle to a submitted transaction.

use crate::errors::LedgerError;
use crate::ports::LedgerClient;
use shared_types::{Hash, Receipt};
use std::sync::Arc;

/// A transaction accepted by the ledger and not yet awaited.
pub struct PendingTransaction {
    client: Arc<dyn LedgerClient>,
    tx_hash: Hash,
}

impl PendingTransaction {
    /// Wrap a submitted hash.
    pub fn new(client: Arc<dyn LedgerClient>, tx_hash: Hash) -> Self {
        Self { client, tx_hash }
    }

    /// Hash of the submitted transaction.
    pub fn tx_hash(&self) -> Hash {
        self.tx_hash
    }

    /// Wait for inclusion. The receipt may still carry status 0.
    pub async fn wait(self) -> Result<Receipt, LedgerError> {
        self.client.wait_for_receipt(self.tx_hash).await
    }
}

impl std::fmt::Debug for PendingTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTransaction")
            .field("tx_hash", &hex::encode(self.tx_hash))
            .finish()
    }
}
