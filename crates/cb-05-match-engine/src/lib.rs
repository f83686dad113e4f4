//! # CB-05: Match Engine
//!
//! Binds a meta-bundle to a single-transaction clearing payment.
//!
//! ## Grant rule
//!
//! ```text
//! match grant = meta-bundle viewers ∪ extra grant ∪ configured peekers
//! ```
//!
//! The union is computed by the MetaBundle contract, so a match can never be
//! narrower than the meta-bundle it clears.
//!
//! ## Payment checks
//!
//! Settlement always enforces the clearing terms and reverts on mismatch
//! (`RejectedCommit`). When the caller passes the terms observed in the
//! meta-bundle hint, the engine also refuses a mismatched payment before
//! sending anything (`PaymentMismatch`).

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use config::MatchConfig;
pub use domain::{payment_bundle, MatchError, MatchRequest};
pub use ports::MatchEngineApi;
pub use service::MatchEngine;
