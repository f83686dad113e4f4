//! # Contract ABI
//!
//! The three logical contracts, their call data and their events.
//!
//! | Contract | Methods | Events |
//! |----------|---------|--------|
//! | BasicBundle | `newBundle` | `HintEvent` |
//! | MetaBundle | `newMetaBundle`, `newMatch` | `HintEvent` (with meta-bundle), `MatchEvent` |
//! | BlockBuilder | `build` | `NewBuilderBidEvent` |
//!
//! Event fields are decoded positionally in declaration order. A log whose
//! data has a different field count or type fails to decode.

use crate::block::{Bid, BuildArgs};
use crate::capability::{CapabilityGrant, Hint, MetaBundleHint, PayloadKind, RevealCondition};
use crate::codec::{self, keccak256};
use crate::entities::{Address, DataReference, Hash, MetaBundle};
use crate::errors::CodecError;
use crate::ledger::{Log, Receipt};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Which logical contract a deployment creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractKind {
    /// Leaf bundle intake
    BasicBundle,
    /// Meta-bundle aggregation and matching
    MetaBundle,
    /// Block assembly
    BlockBuilder,
}

impl ContractKind {
    /// Creation code understood by the settlement ledger.
    pub fn creation_code(&self) -> Result<Vec<u8>, CodecError> {
        codec::encode(self)
    }

    /// Parse creation code.
    pub fn from_creation_code(code: &[u8]) -> Result<Self, CodecError> {
        codec::decode(code)
    }
}

/// Call data for every contract method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractCall {
    /// `BasicBundle.newBundle(slot, allowedPeekers, extraPeekers)`
    NewBundle {
        /// Target slot, also the reveal condition
        slot: u64,
        /// Viewers of the bundle
        allowed_peekers: Vec<Address>,
        /// Additional viewers
        extra_peekers: Vec<Address>,
    },
    /// `MetaBundle.newMetaBundle(slot, allowedPeekers, extraPeekers, metaBundle)`
    NewMetaBundle {
        /// Target slot, also the reveal condition
        slot: u64,
        /// Viewers of the meta-bundle
        allowed_peekers: Vec<Address>,
        /// Additional viewers
        extra_peekers: Vec<Address>,
        /// Structured fields
        meta_bundle: MetaBundle,
    },
    /// `MetaBundle.newMatch(slot, allowedPeekers, extraPeekers, dataId)`
    NewMatch {
        /// Target slot, also the reveal condition
        slot: u64,
        /// Viewers added to the meta-bundle's viewers
        allowed_peekers: Vec<Address>,
        /// Additional viewers
        extra_peekers: Vec<Address>,
        /// Meta-bundle being matched
        data_id: DataReference,
    },
    /// `BlockBuilder.build(slot, buildArgs, allowedPeekers, extraPeekers, dataIds)`
    Build {
        /// Target slot, also the reveal condition of the bid
        slot: u64,
        /// Parent-derived block fields
        build_args: BuildArgs,
        /// Viewers of the bid
        allowed_peekers: Vec<Address>,
        /// Additional viewers
        extra_peekers: Vec<Address>,
        /// References in inclusion order
        data_ids: Vec<DataReference>,
    },
}

impl ContractCall {
    /// Method name, for logs.
    pub fn method(&self) -> &'static str {
        match self {
            ContractCall::NewBundle { .. } => "newBundle",
            ContractCall::NewMetaBundle { .. } => "newMetaBundle",
            ContractCall::NewMatch { .. } => "newMatch",
            ContractCall::Build { .. } => "build",
        }
    }

    /// Encode as transaction data.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        codec::encode(self)
    }

    /// Decode transaction data.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        codec::decode(data)
    }
}

/// A contract event with a fixed signature and positional fields.
pub trait ContractEvent: Serialize + DeserializeOwned {
    /// Canonical signature; its keccak hash is topic 0.
    const SIGNATURE: &'static str;

    /// Topic 0 for this event.
    fn topic() -> Hash {
        keccak256(Self::SIGNATURE.as_bytes())
    }

    /// Emit as a log from `address`.
    fn to_log(&self, address: Address) -> Result<Log, CodecError> {
        Ok(Log {
            address,
            topics: vec![Self::topic()],
            data: codec::encode(self)?,
        })
    }

    /// Decode from a single log.
    fn from_log(log: &Log) -> Result<Self, CodecError> {
        if log.topics.first() != Some(&Self::topic()) {
            return Err(CodecError::TopicMismatch {
                event: Self::SIGNATURE,
            });
        }
        codec::decode(&log.data)
    }

    /// Decode the first log in `receipt` carrying this event's topic.
    fn from_receipt(receipt: &Receipt) -> Result<Self, CodecError> {
        let topic = Self::topic();
        let log = receipt
            .logs
            .iter()
            .find(|log| log.topics.first() == Some(&topic))
            .ok_or(CodecError::MissingEvent {
                event: Self::SIGNATURE,
            })?;
        Self::from_log(log)
    }
}

/// `BasicBundle.HintEvent`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintEvent {
    /// Issued reference
    pub data_id: DataReference,
    /// Reveal slot
    pub reveal_condition: u64,
    /// Viewers
    pub allowed_peekers: Vec<Address>,
}

impl ContractEvent for HintEvent {
    const SIGNATURE: &'static str = "HintEvent(bytes16,uint64,address[])";
}

impl HintEvent {
    /// Hint announced by this event.
    pub fn into_hint(self, kind: PayloadKind) -> Hint {
        Hint {
            data_ref: self.data_id,
            grant: event_grant(self.allowed_peekers, self.reveal_condition),
            kind,
        }
    }
}

/// `MetaBundle.HintEvent`, which also publishes the structured fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaBundleHintEvent {
    /// Issued reference
    pub data_id: DataReference,
    /// Reveal slot
    pub reveal_condition: u64,
    /// Viewers
    pub allowed_peekers: Vec<Address>,
    /// Public structured fields
    pub meta_bundle: MetaBundle,
}

impl ContractEvent for MetaBundleHintEvent {
    const SIGNATURE: &'static str = "HintEvent(bytes16,uint64,address[],(bytes16[],uint256,address))";
}

impl MetaBundleHintEvent {
    /// Meta-bundle hint announced by this event.
    pub fn into_hint(self) -> MetaBundleHint {
        MetaBundleHint {
            hint: Hint {
                data_ref: self.data_id,
                grant: event_grant(self.allowed_peekers, self.reveal_condition),
                kind: PayloadKind::MetaBundle,
            },
            meta_bundle: self.meta_bundle,
        }
    }
}

/// `MetaBundle.MatchEvent`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    /// Issued match reference
    pub data_id: DataReference,
    /// Reveal slot
    pub reveal_condition: u64,
    /// Viewers (meta-bundle viewers plus additions)
    pub allowed_peekers: Vec<Address>,
}

impl ContractEvent for MatchEvent {
    const SIGNATURE: &'static str = "MatchEvent(bytes16,uint64,address[])";
}

impl MatchEvent {
    /// Hint for the committed match.
    pub fn into_hint(self) -> Hint {
        Hint {
            data_ref: self.data_id,
            grant: event_grant(self.allowed_peekers, self.reveal_condition),
            kind: PayloadKind::Match,
        }
    }
}

/// `BlockBuilder.NewBuilderBidEvent`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBuilderBidEvent {
    /// Issued bid reference
    pub data_id: DataReference,
    /// Reveal slot
    pub reveal_condition: u64,
    /// Viewers
    pub allowed_peekers: Vec<Address>,
    /// Block envelope bytes
    pub envelope: Vec<u8>,
}

impl ContractEvent for NewBuilderBidEvent {
    const SIGNATURE: &'static str = "NewBuilderBidEvent(bytes16,uint64,address[],bytes)";
}

impl NewBuilderBidEvent {
    /// Bid announced by this event.
    pub fn into_bid(self) -> Bid {
        Bid {
            data_ref: self.data_id,
            grant: event_grant(self.allowed_peekers, self.reveal_condition),
            envelope: self.envelope,
        }
    }
}

fn event_grant(allowed_peekers: Vec<Address>, reveal_condition: u64) -> CapabilityGrant {
    CapabilityGrant::new(allowed_peekers, RevealCondition(reveal_condition))
}
