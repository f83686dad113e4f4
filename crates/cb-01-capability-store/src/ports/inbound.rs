//! Inbound Ports (Driving Ports / API)

use crate::domain::errors::StoreError;
use shared_types::{
    Address, Bid, CapabilityGrant, DataReference, Hint, MetaBundle, MetaBundleHint, PayloadKind,
};

/// Primary Capability Store API
pub trait CapabilityStoreApi: ReferenceDirectory {
    /// Store `payload` under a fresh reference and announce it.
    fn commit(
        &self,
        payload: Vec<u8>,
        grant: CapabilityGrant,
        kind: PayloadKind,
    ) -> (DataReference, Hint);

    /// Store a meta-bundle payload and announce its structured fields.
    fn commit_meta_bundle(
        &self,
        payload: Vec<u8>,
        grant: CapabilityGrant,
        meta_bundle: MetaBundle,
    ) -> MetaBundleHint;

    /// Store a block envelope and announce the bid.
    fn commit_bid(&self, envelope: Vec<u8>, grant: CapabilityGrant) -> Bid;

    /// Read a payload at the store's current slot.
    fn resolve(&self, data_ref: DataReference, requester: Address) -> Result<Vec<u8>, StoreError>;

    /// Read a payload as of `slot`.
    ///
    /// Contracts resolve at the slot they execute for.
    fn resolve_at(
        &self,
        data_ref: DataReference,
        requester: Address,
        slot: u64,
    ) -> Result<Vec<u8>, StoreError>;
}

/// Public facts about committed references. Never exposes payloads.
pub trait ReferenceDirectory: Send + Sync {
    /// Whether `data_ref` was ever issued.
    fn exists(&self, data_ref: &DataReference) -> bool;

    /// Payload kind behind `data_ref`.
    fn kind_of(&self, data_ref: &DataReference) -> Option<PayloadKind>;

    /// Grant fixed at commit; grants are public through hints.
    fn grant_of(&self, data_ref: &DataReference) -> Option<CapabilityGrant>;
}
