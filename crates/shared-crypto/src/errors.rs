//! Crypto error types.

use shared_types::CodecError;
use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Invalid signature
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Signer could not be recovered from the signature
    #[error("Signer recovery failed")]
    RecoveryFailed,

    /// Hex key material could not be parsed
    #[error("Invalid key encoding: {0}")]
    InvalidEncoding(String),

    /// Transaction could not be hashed
    #[error(transparent)]
    Codec(#[from] CodecError),
}
