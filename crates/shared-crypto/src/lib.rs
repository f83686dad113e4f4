//! # Shared Crypto - Transaction Signing
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `ecdsa` | secp256k1 (recoverable) | Key handling, address derivation |
//! | `transaction` | secp256k1 over keccak256 | Transaction signing, sender recovery |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod transaction;

// Re-exports
pub use ecdsa::{recover_signer, Secp256k1KeyPair};
pub use errors::CryptoError;
pub use transaction::{recover_sender, sign_request, sign_transaction};
