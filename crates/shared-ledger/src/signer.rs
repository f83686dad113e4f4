//! # Transaction Preparation
//!
//! Gas price and gas limit are filled from the ledger when the request leaves
//! them empty. The nonce always comes from the [`Actor`].
//!
//! The actor is updated as soon as the transaction is signed. A send that
//! fails afterwards leaves a permanent gap in the actor's nonce sequence;
//! nothing here rolls it back.

use crate::errors::LedgerError;
use crate::pending::PendingTransaction;
use crate::ports::LedgerClient;
use shared_crypto::{sign_request, Secp256k1KeyPair};
use shared_types::{Actor, CallMsg, ConfidentialComputeRequest, TransactionRequest};
use std::sync::Arc;
use tracing::debug;

/// Actor for `key`, nonce seeded from the ledger's pending nonce.
pub async fn sync_actor(
    client: &dyn LedgerClient,
    key: &Secp256k1KeyPair,
) -> Result<Actor, LedgerError> {
    let identity = key.address();
    let nonce = client.pending_nonce_at(identity).await?;
    Ok(Actor::new(identity, nonce))
}

/// Sign `request` as `actor` and submit it with `confidential_inputs`.
pub async fn sign_and_send(
    client: &Arc<dyn LedgerClient>,
    key: &Secp256k1KeyPair,
    actor: &mut Actor,
    request: TransactionRequest,
    confidential_inputs: Vec<u8>,
) -> Result<PendingTransaction, LedgerError> {
    if key.address() != actor.identity {
        return Err(LedgerError::IdentityMismatch {
            key: key.address(),
            actor: actor.identity,
        });
    }

    let gas_price = match request.gas_price {
        Some(price) => price,
        None => client.suggest_gas_price().await?,
    };
    let gas_limit = match request.gas {
        Some(gas) => gas,
        None => {
            client
                .estimate_gas(CallMsg {
                    from: actor.identity,
                    to: request.to,
                    gas_price: Some(gas_price),
                    value: request.value,
                    data: request.data.clone(),
                })
                .await?
        }
    };

    let (signed, next) = sign_request(key, *actor, request, gas_price, gas_limit)?;
    *actor = next;

    let tx_hash = client
        .send_transaction(ConfidentialComputeRequest {
            transaction: signed,
            confidential_inputs,
        })
        .await?;

    debug!(
        sender = %hex::encode(actor.identity),
        nonce = actor.nonce - 1,
        tx_hash = %hex::encode(tx_hash),
        "Transaction sent"
    );

    Ok(PendingTransaction::new(client.clone(), tx_hash))
}
