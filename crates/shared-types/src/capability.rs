//! # Capabilities and Hints
//!
//! Access to a confidential payload is a pure predicate:
//! `requester ∈ viewers ∧ current_slot ≥ reveal_condition`.
//! No decryption is modeled.

use crate::entities::{Address, DataReference, MetaBundle};
use serde::{Deserialize, Serialize};

/// Slot at or after which a payload may be opened.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RevealCondition(pub u64);

impl RevealCondition {
    /// Whether the condition holds at `current_slot`.
    pub fn is_met(&self, current_slot: u64) -> bool {
        current_slot >= self.0
    }
}

/// Outcome of evaluating a grant for one requester.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessDecision {
    /// Requester may read the payload.
    Granted,
    /// Requester is not a viewer.
    Denied,
    /// Requester is a viewer but the reveal slot has not arrived.
    NotYetRevealable,
}

/// Ordered viewer allow-list plus reveal condition.
///
/// Viewers keep first-occurrence order and never repeat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityGrant {
    viewers: Vec<Address>,
    reveal_condition: RevealCondition,
}

impl CapabilityGrant {
    /// Build a grant, dropping duplicate viewers.
    pub fn new(viewers: impl IntoIterator<Item = Address>, reveal_condition: RevealCondition) -> Self {
        let mut grant = Self {
            viewers: Vec::new(),
            reveal_condition,
        };
        grant.absorb(viewers);
        grant
    }

    fn absorb(&mut self, viewers: impl IntoIterator<Item = Address>) {
        for viewer in viewers {
            if !self.viewers.contains(&viewer) {
                self.viewers.push(viewer);
            }
        }
    }

    /// Viewers in grant order.
    pub fn viewers(&self) -> &[Address] {
        &self.viewers
    }

    /// Reveal condition.
    pub fn reveal_condition(&self) -> RevealCondition {
        self.reveal_condition
    }

    /// Whether `identity` is a viewer.
    pub fn is_viewer(&self, identity: &Address) -> bool {
        self.viewers.contains(identity)
    }

    /// Evaluate access for `requester` at `current_slot`.
    ///
    /// Membership is checked first: a non-viewer is denied even before the
    /// reveal slot.
    pub fn check(&self, requester: &Address, current_slot: u64) -> AccessDecision {
        if !self.is_viewer(requester) {
            AccessDecision::Denied
        } else if !self.reveal_condition.is_met(current_slot) {
            AccessDecision::NotYetRevealable
        } else {
            AccessDecision::Granted
        }
    }

    /// New grant holding every current viewer followed by `extra`.
    ///
    /// Grants only ever grow; there is no narrowing counterpart.
    #[must_use]
    pub fn union(&self, extra: impl IntoIterator<Item = Address>) -> Self {
        let mut grant = self.clone();
        grant.absorb(extra);
        grant
    }

    /// Whether every viewer of `other` is also a viewer here.
    pub fn is_superset_of(&self, other: &CapabilityGrant) -> bool {
        other.viewers.iter().all(|v| self.is_viewer(v))
    }
}

/// What kind of payload a hint announces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayloadKind {
    /// Leaf bundle
    Bundle,
    /// Composite order
    MetaBundle,
    /// Clearing payment bundle committed during a match
    Payment,
    /// Meta-bundle / payment binding
    Match,
    /// Assembled block offer
    Bid,
}

/// Public announcement that a payload exists.
///
/// Carries the reference and its visibility rules, never the content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    /// Reference issued for the payload
    pub data_ref: DataReference,
    /// Visibility rules fixed at commit
    pub grant: CapabilityGrant,
    /// Payload kind
    pub kind: PayloadKind,
}

impl Hint {
    /// Reveal condition of the announced payload.
    pub fn reveal_condition(&self) -> RevealCondition {
        self.grant.reveal_condition()
    }
}

/// Hint for a meta-bundle commit, including its public structured fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaBundleHint {
    /// Base hint
    pub hint: Hint,
    /// Structured fields published alongside the hint
    pub meta_bundle: MetaBundle,
}
