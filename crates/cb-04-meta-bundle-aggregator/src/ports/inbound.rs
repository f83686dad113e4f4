//! Inbound Ports (Driving Ports / API)

use crate::domain::AggregateError;
use async_trait::async_trait;
use shared_crypto::Secp256k1KeyPair;
use shared_types::{Actor, Address, CapabilityGrant, DataReference, MetaBundleHint, U256};

/// Primary Meta-Bundle Aggregator API
#[async_trait]
pub trait MetaBundleAggregatorApi: Send + Sync {
    /// Compose `children` into a meta-bundle clearing `clearing_value` to
    /// `fee_recipient`, committed under `grant`.
    ///
    /// Children are checked for existence only; their payloads are never read
    /// or modified.
    async fn aggregate(
        &self,
        key: &Secp256k1KeyPair,
        actor: &mut Actor,
        children: &[DataReference],
        clearing_value: U256,
        fee_recipient: Address,
        grant: &CapabilityGrant,
    ) -> Result<(DataReference, MetaBundleHint), AggregateError>;
}
