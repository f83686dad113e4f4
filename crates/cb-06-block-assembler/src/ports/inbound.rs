//! Inbound Ports (Driving Ports / API)

use crate::domain::{AssembleError, Collecting, Ordered, SlotAssembly, SlotOutcome};
use async_trait::async_trait;
use shared_crypto::Secp256k1KeyPair;
use shared_types::{Actor, Bid, DataReference};

/// Primary Block Assembler API
#[async_trait]
pub trait BlockAssemblerApi: Send + Sync {
    /// Derive the build request of `slot` from the latest ledger header.
    async fn prepare(
        &self,
        slot: SlotAssembly<Collecting>,
    ) -> Result<SlotAssembly<Ordered>, AssembleError>;

    /// Hand an ordered slot to the builder. Exactly one build call is made.
    async fn submit(
        &self,
        key: &Secp256k1KeyPair,
        actor: &mut Actor,
        slot: SlotAssembly<Ordered>,
    ) -> SlotOutcome;

    /// Prepare and submit `references` for `target_slot`.
    async fn assemble(
        &self,
        key: &Secp256k1KeyPair,
        actor: &mut Actor,
        target_slot: u64,
        references: Vec<DataReference>,
    ) -> Result<Bid, AssembleError> {
        let ordered = self
            .prepare(SlotAssembly::with_references(target_slot, references))
            .await?;
        self.submit(key, actor, ordered).await.into_result()
    }
}
