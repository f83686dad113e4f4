//! # Devnet Ledger Service
//!
//! Admits signed transactions, executes them against the contract set and
//! seals one block per included transaction.
//!
//! ## Inclusion
//!
//! 1. Admission: signature, exact nonce, gas bounds, funds for
//!    `value + gas_limit * gas_price`. A refused transaction changes nothing.
//! 2. The sender's nonce is consumed and the fee for the gas used is charged,
//!    whether or not execution succeeds.
//! 3. Value moves only on success. A revert yields status 0 with the error
//!    text as revert reason and no logs.
//! 4. A block is sealed and the slot clock advanced to its number.

use crate::config::SettlementConfig;
use crate::contracts::{self, ContractContext};
use crate::domain::{contract_address, intrinsic_gas, AdmissionError, ChainState, ExecutionError};
use async_trait::async_trait;
use cb_01_capability_store::{CapabilityStoreApi, ManualSlotClock};
use parking_lot::Mutex;
use shared_crypto::recover_sender;
use shared_ledger::{LedgerClient, LedgerError};
use shared_types::{
    Address, CallMsg, ConfidentialComputeRequest, ContractCall, ContractKind, Hash, Header, Log,
    Receipt, SignedTransaction, RECEIPT_STATUS_FAILED, RECEIPT_STATUS_SUCCESS, U256,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Counters kept by the devnet.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LedgerStats {
    /// Transactions included in a block
    pub included: u64,
    /// Included transactions that reverted
    pub reverted: u64,
    /// Transactions refused at admission
    pub refused: u64,
}

/// Outcome of executing one admitted transaction.
struct Execution {
    logs: Vec<Log>,
    contract_address: Option<Address>,
}

/// In-process settlement ledger.
pub struct DevnetLedger {
    config: SettlementConfig,
    state: Mutex<ChainState>,
    stats: Mutex<LedgerStats>,
    store: Arc<dyn CapabilityStoreApi>,
    clock: Arc<ManualSlotClock>,
}

impl DevnetLedger {
    /// Devnet at genesis, executing contracts against `store`.
    ///
    /// `clock` should be the clock `store` reads; sealing advances it.
    pub fn new(
        config: SettlementConfig,
        store: Arc<dyn CapabilityStoreApi>,
        clock: Arc<ManualSlotClock>,
    ) -> Self {
        info!(chain_id = config.chain_id, "Devnet ledger started");
        Self {
            state: Mutex::new(ChainState::genesis(&config)),
            stats: Mutex::new(LedgerStats::default()),
            config,
            store,
            clock,
        }
    }

    /// Credit `amount` to `address` out of thin air.
    pub fn fund_genesis(&self, address: Address, amount: U256) {
        self.state.lock().credit(address, amount);
        debug!(account = %hex::encode(address), amount = %amount, "Genesis allocation");
    }

    /// Number of the latest sealed block.
    pub fn block_number(&self) -> u64 {
        self.state.lock().latest().number
    }

    /// Contract deployed at `address`, if any.
    pub fn contract_at(&self, address: &Address) -> Option<ContractKind> {
        self.state.lock().contract_at(address)
    }

    /// Current counters.
    pub fn stats(&self) -> LedgerStats {
        self.stats.lock().clone()
    }

    /// Devnet configuration.
    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    fn include(&self, request: ConfidentialComputeRequest) -> Result<Hash, AdmissionError> {
        let tx = &request.transaction;
        let tx_hash = tx.hash().map_err(AdmissionError::Codec)?;

        let mut state = self.state.lock();
        let sender = self.admit(&state, tx)?;

        let is_create = tx.to.is_none();
        let callee = tx.to.and_then(|to| state.contract_at(&to));
        let mut gas_used = intrinsic_gas(&tx.data, is_create);
        if callee.is_some() {
            gas_used += self.config.contract_execution_gas;
        }

        let outcome = if gas_used > tx.gas_limit {
            let required = gas_used;
            gas_used = tx.gas_limit;
            Err(ExecutionError::OutOfGas {
                required,
                limit: tx.gas_limit,
            })
        } else {
            self.execute(&mut state, sender, tx, callee, &request.confidential_inputs)
        };

        state.bump_nonce(sender);
        let fee = tx.gas_price.saturating_mul(U256::from(gas_used));
        let paid = state.debit(sender, fee);
        debug_assert!(paid, "admission guarantees the fee");

        let (status, logs, created, revert_reason) = match outcome {
            Ok(execution) => {
                let recipient = execution.contract_address.or(tx.to);
                if let Some(recipient) = recipient {
                    if state.debit(sender, tx.value) {
                        state.credit(recipient, tx.value);
                    }
                }
                (
                    RECEIPT_STATUS_SUCCESS,
                    execution.logs,
                    execution.contract_address,
                    None,
                )
            }
            Err(err) => {
                warn!(
                    tx_hash = %hex::encode(tx_hash),
                    reason = %err,
                    "Transaction reverted"
                );
                (RECEIPT_STATUS_FAILED, Vec::new(), None, Some(err.to_string()))
            }
        };

        let header = state.seal_block(tx_hash, &self.config);
        state.insert_receipt(Receipt {
            tx_hash,
            status,
            logs,
            contract_address: created,
            block_number: header.number,
            gas_used,
            revert_reason,
        });
        drop(state);

        self.clock.advance_to(header.number);
        let mut stats = self.stats.lock();
        stats.included += 1;
        if status == RECEIPT_STATUS_FAILED {
            stats.reverted += 1;
        }

        info!(
            tx_hash = %hex::encode(tx_hash),
            block = header.number,
            status,
            gas_used,
            "Transaction included"
        );
        Ok(tx_hash)
    }

    fn admit(&self, state: &ChainState, tx: &SignedTransaction) -> Result<Address, AdmissionError> {
        if !tx.has_well_formed_signature() {
            return Err(AdmissionError::InvalidSignature);
        }
        let sender = recover_sender(tx).map_err(|_| AdmissionError::InvalidSignature)?;
        let account = state.account(&sender);

        if tx.nonce != account.nonce {
            return Err(AdmissionError::NonceMismatch {
                sender,
                expected: account.nonce,
                actual: tx.nonce,
            });
        }
        if tx.gas_limit > self.config.block_gas_limit {
            return Err(AdmissionError::GasLimitTooHigh {
                gas: tx.gas_limit,
                limit: self.config.block_gas_limit,
            });
        }
        let intrinsic = intrinsic_gas(&tx.data, tx.to.is_none());
        if tx.gas_limit < intrinsic {
            return Err(AdmissionError::IntrinsicGasTooLow {
                required: intrinsic,
                limit: tx.gas_limit,
            });
        }
        let required = tx
            .gas_price
            .saturating_mul(U256::from(tx.gas_limit))
            .saturating_add(tx.value);
        if account.balance < required {
            return Err(AdmissionError::InsufficientFunds {
                required,
                available: account.balance,
            });
        }
        Ok(sender)
    }

    fn execute(
        &self,
        state: &mut ChainState,
        sender: Address,
        tx: &SignedTransaction,
        callee: Option<ContractKind>,
        confidential_inputs: &[u8],
    ) -> Result<Execution, ExecutionError> {
        let Some(to) = tx.to else {
            let kind =
                ContractKind::from_creation_code(&tx.data).map_err(ExecutionError::InvalidCreationCode)?;
            let address = contract_address(&sender, tx.nonce);
            state.insert_contract(address, kind);
            return Ok(Execution {
                logs: Vec::new(),
                contract_address: Some(address),
            });
        };

        let Some(kind) = callee else {
            return Ok(Execution {
                logs: Vec::new(),
                contract_address: None,
            });
        };

        let call = ContractCall::decode(&tx.data).map_err(ExecutionError::InvalidCallData)?;
        debug!(contract = %hex::encode(to), method = call.method(), "Executing contract call");
        let ctx = ContractContext {
            store: self.store.as_ref(),
            address: to,
            confidential_inputs,
        };
        let logs = contracts::execute(kind, call, &ctx)?;
        Ok(Execution {
            logs,
            contract_address: None,
        })
    }
}

#[async_trait]
impl LedgerClient for DevnetLedger {
    async fn send_transaction(
        &self,
        request: ConfidentialComputeRequest,
    ) -> Result<Hash, LedgerError> {
        self.include(request).map_err(|err| {
            self.stats.lock().refused += 1;
            warn!(reason = %err, "Transaction refused");
            LedgerError::TransactionRefused {
                reason: err.to_string(),
            }
        })
    }

    async fn wait_for_receipt(&self, tx_hash: Hash) -> Result<Receipt, LedgerError> {
        self.state
            .lock()
            .receipt(&tx_hash)
            .cloned()
            .ok_or(LedgerError::ReceiptNotFound { tx_hash })
    }

    /// The devnet keeps no history: any known block answers with the latest
    /// balance.
    async fn balance_at(&self, address: Address, block: Option<u64>) -> Result<U256, LedgerError> {
        let state = self.state.lock();
        if let Some(number) = block {
            if state.header(number).is_none() {
                return Err(LedgerError::HeaderNotFound { number });
            }
        }
        Ok(state.account(&address).balance)
    }

    async fn suggest_gas_price(&self) -> Result<U256, LedgerError> {
        Ok(U256::from(self.config.base_gas_price))
    }

    async fn estimate_gas(&self, msg: CallMsg) -> Result<u64, LedgerError> {
        let mut gas = intrinsic_gas(&msg.data, msg.to.is_none());
        let state = self.state.lock();
        if msg.to.is_some_and(|to| state.contract_at(&to).is_some()) {
            gas += self.config.contract_execution_gas;
        }
        Ok(gas)
    }

    async fn pending_nonce_at(&self, address: Address) -> Result<u64, LedgerError> {
        Ok(self.state.lock().account(&address).nonce)
    }

    async fn header_by_number(&self, number: Option<u64>) -> Result<Header, LedgerError> {
        let state = self.state.lock();
        match number {
            None => Ok(state.latest().clone()),
            Some(number) => state
                .header(number)
                .cloned()
                .ok_or(LedgerError::HeaderNotFound { number }),
        }
    }
}
