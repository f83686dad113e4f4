//! # Domain Layer - Settlement
//!
//! - `chain`: accounts, headers, receipts
//! - `gas`: intrinsic gas schedule
//! - `errors`: admission and execution failures

pub mod chain;
pub mod errors;
pub mod gas;

pub use chain::{contract_address, Account, ChainState};
pub use errors::{AdmissionError, ExecutionError};
pub use gas::intrinsic_gas;
