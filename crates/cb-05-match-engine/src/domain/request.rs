//! Match requests and payment construction

use shared_crypto::{sign_request, CryptoError, Secp256k1KeyPair};
use shared_types::{
    Actor, Address, Bundle, ClearingTerms, DataReference, MetaBundleHint, TransactionRequest,
    TRANSFER_GAS, U256,
};

/// Everything needed to match one meta-bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRequest {
    /// Meta-bundle being matched
    pub meta_bundle_ref: DataReference,
    /// Single-transaction clearing payment; its target slot is the match slot
    pub payment: Bundle,
    /// Viewers added on top of the meta-bundle's
    pub extra_grant: Vec<Address>,
    /// Clearing terms observed in the meta-bundle hint, checked before sending
    pub terms: Option<ClearingTerms>,
}

impl MatchRequest {
    /// Request without a local terms check; settlement still enforces them.
    pub fn new(meta_bundle_ref: DataReference, payment: Bundle, extra_grant: Vec<Address>) -> Self {
        Self {
            meta_bundle_ref,
            payment,
            extra_grant,
            terms: None,
        }
    }

    /// Request for the meta-bundle announced by `hint`, checked against its
    /// published clearing terms.
    pub fn from_hint(hint: &MetaBundleHint, payment: Bundle, extra_grant: Vec<Address>) -> Self {
        Self {
            meta_bundle_ref: hint.hint.data_ref,
            payment,
            extra_grant,
            terms: Some(hint.meta_bundle.clearing_terms()),
        }
    }
}

/// Sign a single-transfer payment meeting `terms` at `slot`.
///
/// Consumes one nonce of `payer`, which is returned advanced.
pub fn payment_bundle(
    key: &Secp256k1KeyPair,
    payer: Actor,
    terms: &ClearingTerms,
    slot: u64,
    gas_price: U256,
) -> Result<(Bundle, Actor), CryptoError> {
    let (tx, next) = sign_request(
        key,
        payer,
        TransactionRequest::transfer(terms.recipient, terms.value).with_gas(TRANSFER_GAS),
        gas_price,
        TRANSFER_GAS,
    )?;
    Ok((Bundle::new(slot, vec![tx]), next))
}
