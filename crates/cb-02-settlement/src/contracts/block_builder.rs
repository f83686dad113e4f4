//! `BlockBuilder.build`
//!
//! Expands references into transactions:
//!
//! | Kind | Expansion |
//! |------|-----------|
//! | Bundle, Payment | its transactions |
//! | MetaBundle | each child in order (the placeholder is dropped) |
//! | Match | the meta-bundle, then the payment |
//! | Bid | rejected |
//!
//! Meta-bundle and match references nest at most [`MAX_NESTING_DEPTH`] levels.

use super::ContractContext;
use crate::domain::ExecutionError;
use shared_types::{
    BlockEnvelope, BuildArgs, Bundle, CapabilityGrant, ContractEvent, DataReference, Hash, Log,
    MatchRecord, MetaBundlePayload, NewBuilderBidEvent, PayloadKind, SignedTransaction,
};
use std::collections::HashSet;

/// Deepest chain of meta-bundle and match references a build expands.
pub const MAX_NESTING_DEPTH: usize = 32;

pub(super) fn build(
    ctx: &ContractContext<'_>,
    slot: u64,
    build_args: BuildArgs,
    grant: CapabilityGrant,
    data_ids: &[DataReference],
) -> Result<Vec<Log>, ExecutionError> {
    if data_ids.is_empty() {
        return Err(ExecutionError::NothingToBuild);
    }
    if build_args.slot != slot {
        return Err(ExecutionError::BuildSlotMismatch {
            args_slot: build_args.slot,
            call_slot: slot,
        });
    }

    let mut transactions = Vec::new();
    for data_ref in data_ids {
        expand(ctx, slot, *data_ref, 0, &mut transactions)?;
    }

    let exceeded = |used| ExecutionError::BlockGasExceeded {
        used,
        limit: build_args.gas_limit,
    };
    let used = transactions
        .iter()
        .try_fold(0u64, |acc, tx| acc.checked_add(tx.gas_limit))
        .ok_or_else(|| exceeded(u64::MAX))?;
    if used > build_args.gas_limit {
        return Err(exceeded(used));
    }

    let mut seen: HashSet<Hash> = HashSet::with_capacity(transactions.len());
    for tx in &transactions {
        let hash = tx.hash().map_err(ExecutionError::Encoding)?;
        if !seen.insert(hash) {
            return Err(ExecutionError::DuplicateTransaction(hash));
        }
    }

    let envelope = BlockEnvelope::seal(&build_args, transactions)
        .and_then(|envelope| envelope.to_bytes())
        .map_err(ExecutionError::Encoding)?;
    let bid = ctx.store.commit_bid(envelope, grant);

    let event = NewBuilderBidEvent {
        data_id: bid.data_ref,
        reveal_condition: bid.reveal_condition().0,
        allowed_peekers: bid.grant.viewers().to_vec(),
        envelope: bid.envelope,
    };
    Ok(vec![event.to_log(ctx.address).map_err(ExecutionError::Encoding)?])
}

fn expand(
    ctx: &ContractContext<'_>,
    slot: u64,
    data_ref: DataReference,
    depth: usize,
    out: &mut Vec<SignedTransaction>,
) -> Result<(), ExecutionError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(ExecutionError::NestingTooDeep {
            data_ref,
            max: MAX_NESTING_DEPTH,
        });
    }
    let kind = ctx
        .store
        .kind_of(&data_ref)
        .ok_or(ExecutionError::UnknownReference(data_ref))?;
    let corrupt = |source| ExecutionError::CorruptPayload { data_ref, source };
    match kind {
        PayloadKind::Bid => return Err(ExecutionError::UnexpectedKind { data_ref, kind }),
        PayloadKind::Bundle | PayloadKind::Payment => {
            let bundle = Bundle::from_payload(&ctx.resolve(data_ref, slot)?).map_err(corrupt)?;
            out.extend(bundle.transactions);
        }
        PayloadKind::MetaBundle => {
            let meta =
                MetaBundlePayload::from_payload(&ctx.resolve(data_ref, slot)?).map_err(corrupt)?;
            for child in meta.meta_bundle.child_references {
                expand(ctx, slot, child, depth + 1, out)?;
            }
        }
        PayloadKind::Match => {
            let record =
                MatchRecord::from_payload(&ctx.resolve(data_ref, slot)?).map_err(corrupt)?;
            expand(ctx, slot, record.meta_bundle_ref, depth + 1, out)?;
            expand(ctx, slot, record.payment_ref, depth + 1, out)?;
        }
    }
    Ok(())
}
