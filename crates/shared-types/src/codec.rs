//! # Positional Codec
//!
//! Contract calls and event data are encoded positionally: every field is
//! written in declaration order with no names or tags. Decoding a buffer
//! with a different field count or type fails instead of guessing.

use crate::entities::Hash;
use crate::errors::CodecError;
use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha3::{Digest, Keccak256};

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

/// Encode a value positionally.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    options()
        .serialize(value)
        .map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decode a positionally encoded value.
///
/// Trailing bytes are rejected, so a buffer carrying extra fields does not
/// decode as a shorter type.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    options()
        .deserialize(bytes)
        .map_err(|e| CodecError::Decode(e.to_string()))
}

/// Keccak-256 hash.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
