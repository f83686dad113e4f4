//! # Protocol Events
//!
//! Everything published on the hint bus. Events carry references and
//! visibility rules only; confidential payloads never travel here.

use serde::{Deserialize, Serialize};
use shared_types::{Bid, DataReference, Hint, MetaBundleHint, PayloadKind};

/// All events that can be published to the hint bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolEvent {
    /// A payload was committed to the Capability Store.
    HintPublished(Hint),

    /// A meta-bundle was committed; its structured fields are public.
    /// Source: MetaBundle contract | Target: Match Engine
    MetaBundleHintPublished(MetaBundleHint),

    /// A block was assembled and its bid committed.
    /// Source: BlockBuilder contract | Target: Block Assembler
    BidPublished(Bid),
}

impl ProtocolEvent {
    /// Topic this event is published under.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            ProtocolEvent::HintPublished(hint) => EventTopic::from(hint.kind),
            ProtocolEvent::MetaBundleHintPublished(_) => EventTopic::MetaBundle,
            ProtocolEvent::BidPublished(_) => EventTopic::Bid,
        }
    }

    /// Reference the event announces.
    #[must_use]
    pub fn data_ref(&self) -> DataReference {
        match self {
            ProtocolEvent::HintPublished(hint) => hint.data_ref,
            ProtocolEvent::MetaBundleHintPublished(hint) => hint.hint.data_ref,
            ProtocolEvent::BidPublished(bid) => bid.data_ref,
        }
    }
}

/// Event topics for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Leaf bundle commits.
    Bundle,
    /// Meta-bundle commits.
    MetaBundle,
    /// Clearing payment commits.
    Payment,
    /// Match commits.
    Match,
    /// Bid commits.
    Bid,
    /// All events.
    All,
}

impl From<PayloadKind> for EventTopic {
    fn from(kind: PayloadKind) -> Self {
        match kind {
            PayloadKind::Bundle => EventTopic::Bundle,
            PayloadKind::MetaBundle => EventTopic::MetaBundle,
            PayloadKind::Payment => EventTopic::Payment,
            PayloadKind::Match => EventTopic::Match,
            PayloadKind::Bid => EventTopic::Bid,
        }
    }
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &ProtocolEvent) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}
