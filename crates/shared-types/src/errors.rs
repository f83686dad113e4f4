//! # Error Taxonomy
//!
//! Every stage defines its own error enum. Each of them classifies itself into
//! one [`ErrorKind`] and names the [`Stage`] it came from, so a caller can
//! decide whether to re-sequence, abandon the slot, or escalate.
//!
//! The core never retries. [`Classified::is_retryable`] exists so callers can
//! ask, and the answer is always `false`.

use std::fmt;
use thiserror::Error;

/// Coarse error classes shared by all pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed bundle, empty composite, bad payment terms. Caller error.
    InvalidInput,
    /// Referenced payload was never committed (or not yet).
    UnknownReference,
    /// The settlement transaction reverted.
    RejectedCommit,
    /// Requester is not in the grant's viewer list.
    AccessDenied,
    /// Current slot is below the grant's reveal condition.
    NotYetRevealable,
    /// A receipt or event did not have the expected shape.
    MalformedResponse,
    /// The ledger client itself failed (transport, nonce, funds).
    Ledger,
    /// Invariant violation inside the core.
    Internal,
}

/// Pipeline stage that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Capability Store.
    CapabilityStore,
    /// Settlement ledger and its contracts.
    Settlement,
    /// Bundle Submitter.
    BundleSubmitter,
    /// Meta-Bundle Aggregator.
    MetaBundleAggregator,
    /// Match Engine.
    MatchEngine,
    /// Block Assembler.
    BlockAssembler,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::CapabilityStore => "capability-store",
            Stage::Settlement => "settlement",
            Stage::BundleSubmitter => "bundle-submitter",
            Stage::MetaBundleAggregator => "meta-bundle-aggregator",
            Stage::MatchEngine => "match-engine",
            Stage::BlockAssembler => "block-assembler",
        };
        f.write_str(name)
    }
}

/// Implemented by every stage error.
pub trait Classified {
    /// Taxonomy class of this error.
    fn kind(&self) -> ErrorKind;

    /// Stage that produced this error.
    fn stage(&self) -> Stage;

    /// The core performs no implicit retries.
    fn is_retryable(&self) -> bool {
        false
    }
}

/// Encoding and decoding failures for payloads, calls and events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Value could not be encoded.
    #[error("Encode failed: {0}")]
    Encode(String),

    /// Bytes did not decode into the expected shape.
    #[error("Decode failed: {0}")]
    Decode(String),

    /// No log in the receipt carried the expected event topic.
    #[error("Event {event} not found in receipt logs")]
    MissingEvent {
        /// Event signature that was expected
        event: &'static str,
    },

    /// Log topic does not belong to the expected event.
    #[error("Topic mismatch for event {event}")]
    TopicMismatch {
        /// Event signature that was expected
        event: &'static str,
    },
}
