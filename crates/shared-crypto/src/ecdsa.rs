//! # ECDSA Signatures (secp256k1)
//!
//! Recoverable ECDSA over 32-byte prehashes, as used for ledger transactions.
//!
//! ## Properties
//!
//! - RFC 6979 deterministic nonces
//! - Low-S normalization, recovery id adjusted to match
//! - Address = last 20 bytes of keccak256 over the uncompressed public key
//!   (without the 0x04 prefix)

use crate::CryptoError;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use shared_types::{keccak256, Address, Hash, TxSignature};
use zeroize::Zeroizing;

/// secp256k1 ECDSA keypair.
#[derive(Clone)]
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let bytes = Zeroizing::new(bytes);
        let signing_key =
            SigningKey::from_bytes((&*bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Create from a hex secret key, with or without `0x`.
    pub fn from_hex(encoded: &str) -> Result<Self, CryptoError> {
        let trimmed = encoded.trim();
        let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let decoded = Zeroizing::new(
            hex::decode(trimmed).map_err(|e| CryptoError::InvalidEncoding(e.to_string()))?,
        );
        let bytes: [u8; 32] = decoded.as_slice().try_into().map_err(|_| {
            CryptoError::InvalidEncoding(format!("expected 32 bytes, got {}", decoded.len()))
        })?;
        Self::from_bytes(bytes)
    }

    /// Address controlled by this key.
    pub fn address(&self) -> Address {
        address_of(self.signing_key.verifying_key())
    }

    /// Sign a 32-byte prehash, returning a recoverable signature.
    pub fn sign_prehash(&self, prehash: &Hash) -> Result<TxSignature, CryptoError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(prehash)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        let (r, s) = signature.split_bytes();
        Ok(TxSignature {
            r: r.into(),
            s: s.into(),
            v: recovery_id.to_byte(),
        })
    }
}

impl std::fmt::Debug for Secp256k1KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1KeyPair")
            .field("address", &hex::encode(self.address()))
            .finish_non_exhaustive()
    }
}

/// Recover the address that produced `signature` over `prehash`.
pub fn recover_signer(prehash: &Hash, signature: &TxSignature) -> Result<Address, CryptoError> {
    let sig = Signature::from_scalars(signature.r, signature.s)
        .map_err(|_| CryptoError::InvalidSignature)?;
    let recovery_id = RecoveryId::from_byte(signature.v).ok_or(CryptoError::InvalidSignature)?;
    let key = VerifyingKey::recover_from_prehash(prehash, &sig, recovery_id)
        .map_err(|_| CryptoError::RecoveryFailed)?;
    Ok(address_of(&key))
}

fn address_of(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let digest = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[12..]);
    address
}
