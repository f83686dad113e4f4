//! Inbound Ports (Driving Ports / API)

use crate::domain::SubmitError;
use async_trait::async_trait;
use shared_crypto::Secp256k1KeyPair;
use shared_types::{Actor, Bundle, CapabilityGrant, DataReference, Hint};

/// Primary Bundle Submitter API
#[async_trait]
pub trait BundleSubmitterApi: Send + Sync {
    /// Validate `bundle` and commit it under `grant`, signing as `actor`.
    ///
    /// Transactions are committed in the order given.
    async fn submit(
        &self,
        key: &Secp256k1KeyPair,
        actor: &mut Actor,
        bundle: &Bundle,
        grant: &CapabilityGrant,
    ) -> Result<(DataReference, Hint), SubmitError>;
}
