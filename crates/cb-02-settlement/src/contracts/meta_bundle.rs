//! `MetaBundle.newMetaBundle` and `MetaBundle.newMatch`

use super::ContractContext;
use crate::domain::ExecutionError;
use shared_types::{
    Address, Bundle, CapabilityGrant, ContractEvent, DataReference, Log, MatchEvent, MatchRecord,
    MetaBundle, MetaBundleHintEvent, MetaBundlePayload, PayloadKind, RevealCondition,
};

pub(super) fn new_meta_bundle(
    ctx: &ContractContext<'_>,
    grant: CapabilityGrant,
    meta_bundle: MetaBundle,
) -> Result<Vec<Log>, ExecutionError> {
    if meta_bundle.child_references.is_empty() {
        return Err(ExecutionError::EmptyComposite);
    }
    for child in &meta_bundle.child_references {
        match ctx.store.kind_of(child) {
            Some(PayloadKind::Bundle | PayloadKind::MetaBundle) => {}
            Some(kind) => {
                return Err(ExecutionError::UnexpectedKind {
                    data_ref: *child,
                    kind,
                })
            }
            None => return Err(ExecutionError::UnknownReference(*child)),
        }
    }

    let payload = MetaBundlePayload::from_payload(ctx.confidential_inputs)
        .map_err(ExecutionError::InvalidConfidentialInputs)?;
    if payload.meta_bundle != meta_bundle {
        return Err(ExecutionError::MetaBundleMismatch);
    }

    let hint = ctx
        .store
        .commit_meta_bundle(ctx.confidential_inputs.to_vec(), grant, meta_bundle);

    let event = MetaBundleHintEvent {
        data_id: hint.hint.data_ref,
        reveal_condition: hint.hint.reveal_condition().0,
        allowed_peekers: hint.hint.grant.viewers().to_vec(),
        meta_bundle: hint.meta_bundle,
    };
    Ok(vec![event.to_log(ctx.address).map_err(ExecutionError::Encoding)?])
}

/// Bind a meta-bundle to the payment carried in the confidential inputs.
///
/// The match grant holds every meta-bundle viewer followed by the new
/// peekers, so it is never narrower than the meta-bundle's.
pub(super) fn new_match(
    ctx: &ContractContext<'_>,
    slot: u64,
    allowed: &[Address],
    extra: &[Address],
    meta_bundle_ref: DataReference,
) -> Result<Vec<Log>, ExecutionError> {
    match ctx.store.kind_of(&meta_bundle_ref) {
        Some(PayloadKind::MetaBundle) => {}
        Some(kind) => {
            return Err(ExecutionError::UnexpectedKind {
                data_ref: meta_bundle_ref,
                kind,
            })
        }
        None => return Err(ExecutionError::UnknownReference(meta_bundle_ref)),
    }

    let stored = ctx.resolve(meta_bundle_ref, slot)?;
    let meta = MetaBundlePayload::from_payload(&stored)
        .map_err(|source| ExecutionError::CorruptPayload {
            data_ref: meta_bundle_ref,
            source,
        })?
        .meta_bundle;

    let payment = Bundle::from_payload(ctx.confidential_inputs)
        .map_err(ExecutionError::InvalidConfidentialInputs)?;
    let terms = meta.clearing_terms();
    if !terms.is_satisfied_by(&payment) {
        return Err(ExecutionError::PaymentMismatch {
            expected_value: terms.value,
            expected_recipient: terms.recipient,
        });
    }

    let meta_grant = ctx
        .store
        .grant_of(&meta_bundle_ref)
        .ok_or(ExecutionError::UnknownReference(meta_bundle_ref))?;
    let grant = CapabilityGrant::new(
        meta_grant
            .viewers()
            .iter()
            .chain(allowed)
            .chain(extra)
            .copied(),
        RevealCondition(slot),
    );

    let (payment_ref, _) = ctx.store.commit(
        ctx.confidential_inputs.to_vec(),
        grant.clone(),
        PayloadKind::Payment,
    );
    let record = MatchRecord {
        meta_bundle_ref,
        payment_ref,
    };
    let record_bytes = record.to_payload().map_err(ExecutionError::Encoding)?;
    let (data_id, hint) = ctx.store.commit(record_bytes, grant, PayloadKind::Match);

    let event = MatchEvent {
        data_id,
        reveal_condition: hint.reveal_condition().0,
        allowed_peekers: hint.grant.viewers().to_vec(),
    };
    Ok(vec![event.to_log(ctx.address).map_err(ExecutionError::Encoding)?])
}
