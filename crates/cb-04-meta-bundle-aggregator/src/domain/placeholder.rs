//! Synthetic payment placeholder
//!
//! The placeholder keeps the meta-bundle payload shaped like a bundle. It is
//! signed by a throwaway key at nonce 0 with a zero gas price, so it never
//! moves funds and never consumes a nonce of the aggregating actor.

use shared_crypto::{sign_request, CryptoError, Secp256k1KeyPair};
use shared_types::{Actor, Bundle, MetaBundle, TransactionRequest, TRANSFER_GAS, U256};

/// Placeholder bundle paying `meta_bundle`'s clearing terms at `slot`.
pub fn placeholder_bundle(meta_bundle: &MetaBundle, slot: u64) -> Result<Bundle, CryptoError> {
    let key = Secp256k1KeyPair::generate();
    let (tx, _) = sign_request(
        &key,
        Actor::new(key.address(), 0),
        TransactionRequest::transfer(meta_bundle.fee_recipient, meta_bundle.clearing_value),
        U256::zero(),
        TRANSFER_GAS,
    )?;
    Ok(Bundle::new(slot, vec![tx]))
}
