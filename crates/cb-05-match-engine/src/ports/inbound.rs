//! Inbound Ports (Driving Ports / API)

use crate::domain::{MatchError, MatchRequest};
use async_trait::async_trait;
use shared_crypto::Secp256k1KeyPair;
use shared_types::{Actor, DataReference, Hint};

/// Primary Match Engine API
#[async_trait]
pub trait MatchEngineApi: Send + Sync {
    /// Commit `request.payment` as the clearing payment of
    /// `request.meta_bundle_ref`.
    ///
    /// The returned hint's grant contains every viewer of the meta-bundle.
    async fn match_meta_bundle(
        &self,
        key: &Secp256k1KeyPair,
        actor: &mut Actor,
        request: MatchRequest,
    ) -> Result<(DataReference, Hint), MatchError>;
}
