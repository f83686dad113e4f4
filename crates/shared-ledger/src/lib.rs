//! # Shared Ledger - Settlement Client Plumbing
//!
//! Everything a pipeline stage needs to talk to the settlement ledger:
//!
//! - **Port**: [`LedgerClient`], implemented by the devnet ledger and by any
//!   remote client.
//! - **Preparation**: [`sign_and_send`] fills gas from the ledger, signs with
//!   the caller's [`Actor`](shared_types::Actor) and submits.
//! - **Contracts**: [`ContractClient`] turns a contract call into a receipt,
//!   mapping status 0 to [`CommitError::Rejected`].
//! - **Accounts**: [`fund_account`] and [`deploy_contract`].

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod account;
pub mod contract;
pub mod errors;
pub mod pending;
pub mod ports;
pub mod signer;

#[cfg(test)]
mod testing;

pub use account::{deploy_contract, fund_account};
pub use contract::ContractClient;
pub use errors::{CommitError, LedgerError};
pub use pending::PendingTransaction;
pub use ports::LedgerClient;
pub use signer::{sign_and_send, sync_actor};
