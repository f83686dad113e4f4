//! # Transaction Signing
//!
//! Signing consumes the actor's current nonce. The returned actor carries the
//! next one; callers store it immediately, whether or not the transaction is
//! later accepted.

use crate::{recover_signer, CryptoError, Secp256k1KeyPair};
use shared_types::{Actor, Address, SignedTransaction, TransactionRequest, U256, UnsignedTransaction};

/// Sign `tx` with `key`.
pub fn sign_transaction(
    key: &Secp256k1KeyPair,
    tx: UnsignedTransaction,
) -> Result<SignedTransaction, CryptoError> {
    let signature = key.sign_prehash(&tx.signing_hash()?)?;
    Ok(tx.into_signed(signature))
}

/// Fill `request` with `actor`'s nonce and the given gas settings, then sign.
///
/// Returns the signed transaction and the actor advanced by one nonce.
pub fn sign_request(
    key: &Secp256k1KeyPair,
    actor: Actor,
    request: TransactionRequest,
    gas_price: U256,
    gas_limit: u64,
) -> Result<(SignedTransaction, Actor), CryptoError> {
    let unsigned = UnsignedTransaction {
        nonce: actor.nonce,
        to: request.to,
        value: request.value,
        gas_price: request.gas_price.unwrap_or(gas_price),
        gas_limit: request.gas.unwrap_or(gas_limit),
        data: request.data,
    };
    let signed = sign_transaction(key, unsigned)?;
    Ok((signed, actor.advanced()))
}

/// Recover the sender of a signed transaction.
pub fn recover_sender(tx: &SignedTransaction) -> Result<Address, CryptoError> {
    recover_signer(&tx.unsigned().signing_hash()?, &tx.signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_request_advances_actor() {
        let key = Secp256k1KeyPair::generate();
        let actor = Actor::new(key.address(), 7);

        let (tx, next) = sign_request(
            &key,
            actor,
            TransactionRequest::transfer([3; 20], U256::from(10)),
            U256::from(2),
            21_000,
        )
        .unwrap();

        assert_eq!(tx.nonce, 7);
        assert_eq!(next.nonce, 8);
        assert_eq!(tx.gas_price, U256::from(2));
        assert_eq!(recover_sender(&tx).unwrap(), key.address());
    }

    #[test]
    fn test_pinned_gas_wins() {
        let key = Secp256k1KeyPair::generate();
        let request = TransactionRequest::transfer([3; 20], U256::one())
            .with_gas(50_000)
            .with_gas_price(U256::from(9));

        let (tx, _) =
            sign_request(&key, Actor::new(key.address(), 0), request, U256::from(1), 21_000)
                .unwrap();

        assert_eq!(tx.gas_limit, 50_000);
        assert_eq!(tx.gas_price, U256::from(9));
    }

    #[test]
    fn test_tampered_transaction_changes_sender() {
        let key = Secp256k1KeyPair::generate();
        let (mut tx, _) = sign_request(
            &key,
            Actor::new(key.address(), 0),
            TransactionRequest::transfer([3; 20], U256::one()),
            U256::one(),
            21_000,
        )
        .unwrap();
        tx.value = U256::from(1_000_000);

        let sender = recover_sender(&tx);
        assert!(sender.map(|a| a != key.address()).unwrap_or(true));
    }

    proptest::proptest! {
        #![proptest_config(proptest::prelude::ProptestConfig::with_cases(16))]
        #[test]
        fn prop_nonce_consumed_once(start in 0u64..1_000_000) {
            let key = Secp256k1KeyPair::from_bytes([0x42; 32]).unwrap();
            let (tx, next) = sign_request(
                &key,
                Actor::new(key.address(), start),
                TransactionRequest::transfer([1; 20], U256::one()),
                U256::one(),
                21_000,
            ).unwrap();
            proptest::prop_assert_eq!(tx.nonce, start);
            proptest::prop_assert_eq!(next.nonce, start + 1);
        }
    }
}
