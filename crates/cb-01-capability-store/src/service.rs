//! Capability Store Service
//!
//! In-memory implementation of [`CapabilityStoreApi`].
//!
//! 1. Draw a reference not yet issued
//! 2. Insert the payload with its grant
//! 3. Publish the hint

use crate::domain::{StoreError, StoredPayload};
use crate::ports::{CapabilityStoreApi, ReferenceDirectory, SlotSource};
use parking_lot::RwLock;
use shared_bus::{EventPublisher, ProtocolEvent};
use shared_types::{
    AccessDecision, Address, Bid, CapabilityGrant, DataReference, Hint, MetaBundle,
    MetaBundleHint, PayloadKind,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Capability Store
pub struct CapabilityStore {
    entries: RwLock<HashMap<DataReference, StoredPayload>>,
    clock: Arc<dyn SlotSource>,
    publisher: Arc<dyn EventPublisher>,
}

impl CapabilityStore {
    /// Create a store reading slots from `clock` and announcing on `publisher`.
    pub fn new(clock: Arc<dyn SlotSource>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
            publisher,
        }
    }

    /// Number of committed payloads.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn insert(&self, payload: Vec<u8>, grant: CapabilityGrant, kind: PayloadKind) -> Hint {
        let committed_at = self.clock.current_slot();
        let size = payload.len();
        let mut entries = self.entries.write();

        let mut data_ref = DataReference::random();
        while entries.contains_key(&data_ref) {
            data_ref = DataReference::random();
        }

        entries.insert(
            data_ref,
            StoredPayload {
                payload,
                grant: grant.clone(),
                kind,
                committed_at,
            },
        );
        drop(entries);

        info!(
            data_ref = %data_ref,
            kind = ?kind,
            viewers = grant.viewers().len(),
            reveal = grant.reveal_condition().0,
            size,
            "Payload committed"
        );

        Hint {
            data_ref,
            grant,
            kind,
        }
    }
}

impl ReferenceDirectory for CapabilityStore {
    fn exists(&self, data_ref: &DataReference) -> bool {
        self.entries.read().contains_key(data_ref)
    }

    fn kind_of(&self, data_ref: &DataReference) -> Option<PayloadKind> {
        self.entries.read().get(data_ref).map(|entry| entry.kind)
    }

    fn grant_of(&self, data_ref: &DataReference) -> Option<CapabilityGrant> {
        self.entries.read().get(data_ref).map(|entry| entry.grant.clone())
    }
}

impl CapabilityStoreApi for CapabilityStore {
    fn commit(
        &self,
        payload: Vec<u8>,
        grant: CapabilityGrant,
        kind: PayloadKind,
    ) -> (DataReference, Hint) {
        let hint = self.insert(payload, grant, kind);
        self.publisher
            .publish(ProtocolEvent::HintPublished(hint.clone()));
        (hint.data_ref, hint)
    }

    fn commit_meta_bundle(
        &self,
        payload: Vec<u8>,
        grant: CapabilityGrant,
        meta_bundle: MetaBundle,
    ) -> MetaBundleHint {
        let hint = MetaBundleHint {
            hint: self.insert(payload, grant, PayloadKind::MetaBundle),
            meta_bundle,
        };
        self.publisher
            .publish(ProtocolEvent::MetaBundleHintPublished(hint.clone()));
        hint
    }

    fn commit_bid(&self, envelope: Vec<u8>, grant: CapabilityGrant) -> Bid {
        let hint = self.insert(envelope.clone(), grant, PayloadKind::Bid);
        let bid = Bid {
            data_ref: hint.data_ref,
            grant: hint.grant,
            envelope,
        };
        self.publisher.publish(ProtocolEvent::BidPublished(bid.clone()));
        bid
    }

    fn resolve(&self, data_ref: DataReference, requester: Address) -> Result<Vec<u8>, StoreError> {
        self.resolve_at(data_ref, requester, self.clock.current_slot())
    }

    fn resolve_at(
        &self,
        data_ref: DataReference,
        requester: Address,
        slot: u64,
    ) -> Result<Vec<u8>, StoreError> {
        let entries = self.entries.read();
        let entry = entries
            .get(&data_ref)
            .ok_or(StoreError::UnknownReference { data_ref })?;

        match entry.grant.check(&requester, slot) {
            AccessDecision::Granted => {
                debug!(data_ref = %data_ref, requester = %hex::encode(requester), slot, "Payload resolved");
                Ok(entry.payload.clone())
            }
            AccessDecision::Denied => Err(StoreError::AccessDenied {
                data_ref,
                requester,
            }),
            AccessDecision::NotYetRevealable => Err(StoreError::NotYetRevealable {
                data_ref,
                reveal_condition: entry.grant.reveal_condition().0,
                current_slot: slot,
            }),
        }
    }
}
