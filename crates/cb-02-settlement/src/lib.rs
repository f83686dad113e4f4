//! # CB-02: Settlement Devnet
//!
//! In-process ledger implementing [`LedgerClient`](shared_ledger::LedgerClient)
//! and executing the three pipeline contracts against a Capability Store.
//!
//! ## Contracts
//!
//! | Contract | Method | Commits | Event |
//! |----------|--------|---------|-------|
//! | `BasicBundle` | `newBundle` | Bundle | `HintEvent` |
//! | `MetaBundle` | `newMetaBundle` | MetaBundle | `HintEvent` (with fields) |
//! | `MetaBundle` | `newMatch` | Payment, Match | `MatchEvent` |
//! | `BlockBuilder` | `build` | Bid | `NewBuilderBidEvent` |
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Reverts leave no commit | each method validates before its first commit |
//! | Nonce consumed on revert | `service.rs` - bumped before the outcome is applied |
//! | Contracts read as themselves | `ContractContext::resolve` uses the contract address |

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod contracts;
pub mod devnet;
pub mod domain;
pub mod service;

pub use config::SettlementConfig;
pub use devnet::Devnet;
pub use domain::{AdmissionError, ExecutionError};
pub use service::{DevnetLedger, LedgerStats};
