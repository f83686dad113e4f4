//! Bundle validation
//!
//! Checks run in order: size, signatures, slot context. The first failure
//! is reported. A signature is well-formed when it recovers a sender.

use super::errors::InvalidBundle;
use crate::config::SubmitterConfig;
use shared_crypto::recover_sender;
use shared_types::{Bundle, CapabilityGrant};

/// Validate `bundle` against `grant` before it is committed.
pub fn validate(
    bundle: &Bundle,
    grant: &CapabilityGrant,
    config: &SubmitterConfig,
) -> Result<(), InvalidBundle> {
    if bundle.is_empty() {
        return Err(InvalidBundle::Empty);
    }
    if bundle.len() > config.max_bundle_size {
        return Err(InvalidBundle::TooLarge {
            size: bundle.len(),
            max: config.max_bundle_size,
        });
    }
    if let Some(index) = bundle
        .transactions
        .iter()
        .position(|tx| !tx.has_well_formed_signature() || recover_sender(tx).is_err())
    {
        return Err(InvalidBundle::MalformedSignature { index });
    }

    let reveal_condition = grant.reveal_condition().0;
    if reveal_condition != bundle.target_slot {
        return Err(InvalidBundle::SlotMismatch {
            target_slot: bundle.target_slot,
            reveal_condition,
        });
    }
    Ok(())
}
