//! `BasicBundle.newBundle`

use super::ContractContext;
use crate::domain::ExecutionError;
use shared_types::{Bundle, CapabilityGrant, ContractEvent, HintEvent, Log, PayloadKind};

pub(super) fn new_bundle(
    ctx: &ContractContext<'_>,
    slot: u64,
    grant: CapabilityGrant,
) -> Result<Vec<Log>, ExecutionError> {
    let bundle =
        Bundle::from_payload(ctx.confidential_inputs).map_err(ExecutionError::InvalidConfidentialInputs)?;
    if bundle.is_empty() {
        return Err(ExecutionError::EmptyBundle);
    }
    if bundle.target_slot != slot {
        return Err(ExecutionError::SlotMismatch {
            bundle_slot: bundle.target_slot,
            call_slot: slot,
        });
    }

    let (data_id, hint) = ctx
        .store
        .commit(ctx.confidential_inputs.to_vec(), grant, PayloadKind::Bundle);

    let event = HintEvent {
        data_id,
        reveal_condition: hint.reveal_condition().0,
        allowed_peekers: hint.grant.viewers().to_vec(),
    };
    Ok(vec![event.to_log(ctx.address).map_err(ExecutionError::Encoding)?])
}
