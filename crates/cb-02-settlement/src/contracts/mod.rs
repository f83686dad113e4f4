//! # Contracts
//!
//! The three logical contracts executed by the devnet. Every method validates
//! all of its inputs before its first commit, so a revert never leaves a
//! partial write in the Capability Store.
//!
//! Contracts read payloads as themselves: a payload is only expandable by a
//! contract whose address is among its viewers.

mod basic_bundle;
mod block_builder;
mod meta_bundle;

use crate::domain::ExecutionError;
use cb_01_capability_store::CapabilityStoreApi;
use shared_types::{
    Address, CapabilityGrant, ContractCall, ContractKind, DataReference, Log, RevealCondition,
};

/// What a contract sees while executing one call.
pub struct ContractContext<'a> {
    /// Confidential store
    pub store: &'a dyn CapabilityStoreApi,
    /// Address of the executing contract
    pub address: Address,
    /// Private inputs of the transaction
    pub confidential_inputs: &'a [u8],
}

impl ContractContext<'_> {
    /// Read `data_ref` as this contract, at `slot`.
    pub(crate) fn resolve(&self, data_ref: DataReference, slot: u64) -> Result<Vec<u8>, ExecutionError> {
        Ok(self.store.resolve_at(data_ref, self.address, slot)?)
    }
}

/// Execute `call` against the `kind` contract.
pub fn execute(
    kind: ContractKind,
    call: ContractCall,
    ctx: &ContractContext<'_>,
) -> Result<Vec<Log>, ExecutionError> {
    match (kind, call) {
        (
            ContractKind::BasicBundle,
            ContractCall::NewBundle {
                slot,
                allowed_peekers,
                extra_peekers,
            },
        ) => basic_bundle::new_bundle(ctx, slot, grant_for(slot, &allowed_peekers, &extra_peekers)),
        (
            ContractKind::MetaBundle,
            ContractCall::NewMetaBundle {
                slot,
                allowed_peekers,
                extra_peekers,
                meta_bundle,
            },
        ) => meta_bundle::new_meta_bundle(
            ctx,
            grant_for(slot, &allowed_peekers, &extra_peekers),
            meta_bundle,
        ),
        (
            ContractKind::MetaBundle,
            ContractCall::NewMatch {
                slot,
                allowed_peekers,
                extra_peekers,
                data_id,
            },
        ) => meta_bundle::new_match(ctx, slot, &allowed_peekers, &extra_peekers, data_id),
        (
            ContractKind::BlockBuilder,
            ContractCall::Build {
                slot,
                build_args,
                allowed_peekers,
                extra_peekers,
                data_ids,
            },
        ) => block_builder::build(
            ctx,
            slot,
            build_args,
            grant_for(slot, &allowed_peekers, &extra_peekers),
            &data_ids,
        ),
        (kind, call) => Err(ExecutionError::MethodNotFound {
            method: call.method(),
            contract: contract_name(kind),
        }),
    }
}

/// Grant for a new payload: every listed peeker, revealable at `slot`.
fn grant_for(slot: u64, allowed: &[Address], extra: &[Address]) -> CapabilityGrant {
    CapabilityGrant::new(allowed.iter().chain(extra).copied(), RevealCondition(slot))
}

fn contract_name(kind: ContractKind) -> &'static str {
    match kind {
        ContractKind::BasicBundle => "BasicBundle",
        ContractKind::MetaBundle => "MetaBundle",
        ContractKind::BlockBuilder => "BlockBuilder",
    }
}
