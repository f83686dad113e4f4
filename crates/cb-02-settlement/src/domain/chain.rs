//! # Chain State
//!
//! Accounts, deployed contracts, headers and receipts. One block is sealed
//! per included transaction.

use crate::config::SettlementConfig;
use shared_types::{codec, keccak256, Address, ContractKind, Hash, Header, Receipt, U256};
use std::collections::HashMap;

/// Balance and next nonce of an account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Account {
    /// Spendable balance
    pub balance: U256,
    /// Next expected nonce
    pub nonce: u64,
}

/// In-memory chain.
#[derive(Debug)]
pub struct ChainState {
    accounts: HashMap<Address, Account>,
    contracts: HashMap<Address, ContractKind>,
    headers: Vec<Header>,
    receipts: HashMap<Hash, Receipt>,
}

impl ChainState {
    /// Chain holding only the genesis header.
    pub fn genesis(config: &SettlementConfig) -> Self {
        let genesis = Header {
            number: 0,
            hash: keccak256(format!("genesis:{}", config.chain_id).as_bytes()),
            parent_hash: [0u8; 32],
            timestamp: config.genesis_timestamp,
            gas_limit: config.block_gas_limit,
            extra_data: config.extra_data.as_bytes().to_vec(),
        };
        Self {
            accounts: HashMap::new(),
            contracts: HashMap::new(),
            headers: vec![genesis],
            receipts: HashMap::new(),
        }
    }

    /// Latest sealed header.
    pub fn latest(&self) -> &Header {
        // Genesis is inserted at construction and headers are never removed.
        &self.headers[self.headers.len() - 1]
    }

    /// Header at `number`.
    pub fn header(&self, number: u64) -> Option<&Header> {
        usize::try_from(number).ok().and_then(|i| self.headers.get(i))
    }

    /// Account state (default for unseen addresses).
    pub fn account(&self, address: &Address) -> Account {
        self.accounts.get(address).copied().unwrap_or_default()
    }

    /// Add `amount` to `address`.
    pub fn credit(&mut self, address: Address, amount: U256) {
        let account = self.accounts.entry(address).or_default();
        account.balance = account.balance.saturating_add(amount);
    }

    /// Remove `amount` from `address`. Returns false, changing nothing, if
    /// the balance is short.
    pub fn debit(&mut self, address: Address, amount: U256) -> bool {
        let account = self.accounts.entry(address).or_default();
        match account.balance.checked_sub(amount) {
            Some(rest) => {
                account.balance = rest;
                true
            }
            None => false,
        }
    }

    /// Consume the sender's current nonce.
    pub fn bump_nonce(&mut self, address: Address) {
        self.accounts.entry(address).or_default().nonce += 1;
    }

    /// Contract deployed at `address`.
    pub fn contract_at(&self, address: &Address) -> Option<ContractKind> {
        self.contracts.get(address).copied()
    }

    /// Record a deployment.
    pub fn insert_contract(&mut self, address: Address, kind: ContractKind) {
        self.contracts.insert(address, kind);
    }

    /// Seal a block containing `tx_hash`.
    pub fn seal_block(&mut self, tx_hash: Hash, config: &SettlementConfig) -> Header {
        let parent = self.latest();
        let number = parent.number + 1;
        let parent_hash = parent.hash;
        let timestamp = parent.timestamp + config.slot_interval_secs;
        let extra_data = config.extra_data.as_bytes().to_vec();
        let hash = codec::encode(&(number, parent_hash, timestamp, tx_hash, &extra_data))
            .map(|bytes| keccak256(&bytes))
            .unwrap_or_else(|_| keccak256(&tx_hash));

        let header = Header {
            number,
            hash,
            parent_hash,
            timestamp,
            gas_limit: config.block_gas_limit,
            extra_data,
        };
        self.headers.push(header.clone());
        header
    }

    /// Store a receipt.
    pub fn insert_receipt(&mut self, receipt: Receipt) {
        self.receipts.insert(receipt.tx_hash, receipt);
    }

    /// Receipt for `tx_hash`.
    pub fn receipt(&self, tx_hash: &Hash) -> Option<&Receipt> {
        self.receipts.get(tx_hash)
    }
}

/// Address of a contract created by `sender` at `nonce`.
pub fn contract_address(sender: &Address, nonce: u64) -> Address {
    let mut seed = Vec::with_capacity(28);
    seed.extend_from_slice(sender);
    seed.extend_from_slice(&nonce.to_be_bytes());
    let digest = keccak256(&seed);
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[12..]);
    address
}
