//! Scripted ledger used by this crate's tests.

use crate::errors::LedgerError;
use crate::ports::LedgerClient;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{
    Address, CallMsg, ConfidentialComputeRequest, Hash, Header, Log, Receipt, U256,
    RECEIPT_STATUS_FAILED, RECEIPT_STATUS_SUCCESS,
};
use std::collections::HashMap;

#[derive(Default)]
struct Script {
    nonces: HashMap<Address, u64>,
    balances: HashMap<Address, U256>,
    sent: Vec<ConfidentialComputeRequest>,
    receipts: HashMap<Hash, Receipt>,
    refuse: bool,
    revert_next: bool,
    next_logs: Vec<Log>,
    next_contract: Option<Address>,
    credit_transfers: bool,
}

/// Ledger whose next receipt is set by the test.
#[derive(Default)]
pub struct ScriptedLedger {
    script: Mutex<Script>,
}

impl ScriptedLedger {
    pub const GAS_PRICE: u64 = 7;
    pub const GAS_ESTIMATE: u64 = 90_000;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_nonce(&self, address: Address, nonce: u64) {
        self.script.lock().nonces.insert(address, nonce);
    }

    pub fn refuse_sends(&self, refuse: bool) {
        self.script.lock().refuse = refuse;
    }

    pub fn revert_next(&self) {
        self.script.lock().revert_next = true;
    }

    pub fn emit_next(&self, logs: Vec<Log>) {
        self.script.lock().next_logs = logs;
    }

    pub fn create_next(&self, address: Address) {
        self.script.lock().next_contract = Some(address);
    }

    pub fn credit_transfers(&self, credit: bool) {
        self.script.lock().credit_transfers = credit;
    }

    pub fn sent(&self) -> Vec<ConfidentialComputeRequest> {
        self.script.lock().sent.clone()
    }
}

#[async_trait]
impl LedgerClient for ScriptedLedger {
    async fn send_transaction(
        &self,
        request: ConfidentialComputeRequest,
    ) -> Result<Hash, LedgerError> {
        let mut script = self.script.lock();
        if script.refuse {
            return Err(LedgerError::TransactionRefused {
                reason: "scripted refusal".into(),
            });
        }
        let tx_hash = request.hash()?;
        let status = if std::mem::take(&mut script.revert_next) {
            RECEIPT_STATUS_FAILED
        } else {
            RECEIPT_STATUS_SUCCESS
        };
        if status == RECEIPT_STATUS_SUCCESS && script.credit_transfers {
            if let Some(to) = request.transaction.to {
                let balance = script.balances.entry(to).or_default();
                *balance = balance.saturating_add(request.transaction.value);
            }
        }
        let receipt = Receipt {
            tx_hash,
            status,
            logs: std::mem::take(&mut script.next_logs),
            contract_address: script.next_contract.take(),
            block_number: script.sent.len() as u64 + 1,
            gas_used: request.transaction.gas_limit,
            revert_reason: None,
        };
        script.receipts.insert(tx_hash, receipt);
        script.sent.push(request);
        Ok(tx_hash)
    }

    async fn wait_for_receipt(&self, tx_hash: Hash) -> Result<Receipt, LedgerError> {
        self.script
            .lock()
            .receipts
            .get(&tx_hash)
            .cloned()
            .ok_or(LedgerError::ReceiptNotFound { tx_hash })
    }

    async fn balance_at(&self, address: Address, _block: Option<u64>) -> Result<U256, LedgerError> {
        Ok(self
            .script
            .lock()
            .balances
            .get(&address)
            .copied()
            .unwrap_or_default())
    }

    async fn suggest_gas_price(&self) -> Result<U256, LedgerError> {
        Ok(U256::from(Self::GAS_PRICE))
    }

    async fn estimate_gas(&self, _msg: CallMsg) -> Result<u64, LedgerError> {
        Ok(Self::GAS_ESTIMATE)
    }

    async fn pending_nonce_at(&self, address: Address) -> Result<u64, LedgerError> {
        Ok(self
            .script
            .lock()
            .nonces
            .get(&address)
            .copied()
            .unwrap_or_default())
    }

    async fn header_by_number(&self, number: Option<u64>) -> Result<Header, LedgerError> {
        Ok(Header {
            number: number.unwrap_or_default(),
            ..Header::default()
        })
    }
}
