//! # Type-State Slot Assembly
//!
//! One slot attempt moves through a fixed sequence of states. Each state is a
//! distinct type and every transition consumes `self`, so a slot cannot be
//! submitted twice or confirmed without having been submitted:
//!
//! ```text
//! [Collecting] ──order──→ [Ordered] ──submit──→ [Submitted] ──confirm──→ [Confirmed]
//!      ↑                                             │
//!      └────────────── retry ── [Rejected] ←─reject──┘
//! ```
//!
//! Ordering never reorders. The collected references become
//! `BuildRequest::ordered_references` as-is; meta-bundle children are expanded
//! in their committed order by the BlockBuilder contract.

use crate::config::AssemblerConfig;
use crate::domain::AssembleError;
use shared_types::{Bid, BuildRequest, DataReference, Hash, Header};

// =============================================================================
// STATE MARKERS
// =============================================================================

/// State: references are being collected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Collecting;

/// State: a build request has been derived from the parent header.
#[derive(Debug, Clone)]
pub struct Ordered {
    request: BuildRequest,
}

/// State: the build call is in flight.
#[derive(Debug, Clone)]
pub struct Submitted {
    request: BuildRequest,
}

/// State: the builder returned a bid.
#[derive(Debug, Clone)]
pub struct Confirmed {
    bid: Bid,
    tx_hash: Hash,
}

/// State: the attempt failed.
#[derive(Debug)]
pub struct Rejected {
    error: AssembleError,
}

// =============================================================================
// SLOT ASSEMBLY
// =============================================================================

/// A single slot attempt with its state encoded in `S`.
#[derive(Debug)]
pub struct SlotAssembly<S> {
    target_slot: u64,
    references: Vec<DataReference>,
    state: S,
}

impl<S> SlotAssembly<S> {
    /// Slot being assembled.
    pub fn target_slot(&self) -> u64 {
        self.target_slot
    }

    /// References in inclusion order.
    pub fn references(&self) -> &[DataReference] {
        &self.references
    }

    fn transition<T>(self, state: T) -> SlotAssembly<T> {
        SlotAssembly {
            target_slot: self.target_slot,
            references: self.references,
            state,
        }
    }
}

// =============================================================================
// COLLECTING
// =============================================================================

impl SlotAssembly<Collecting> {
    /// Start collecting for `target_slot`.
    pub fn new(target_slot: u64) -> Self {
        Self {
            target_slot,
            references: Vec::new(),
            state: Collecting,
        }
    }

    /// Start with a known sequence of references.
    pub fn with_references(target_slot: u64, references: Vec<DataReference>) -> Self {
        Self {
            target_slot,
            references,
            state: Collecting,
        }
    }

    /// Append a matched meta-bundle or standalone bundle.
    pub fn collect(
        &mut self,
        data_ref: DataReference,
        config: &AssemblerConfig,
    ) -> Result<(), AssembleError> {
        if self.references.len() >= config.max_references {
            return Err(AssembleError::TooManyReferences {
                slot: self.target_slot,
                max: config.max_references,
            });
        }
        self.references.push(data_ref);
        Ok(())
    }

    /// Fix the order and derive the build request from `parent`.
    pub fn order(
        self,
        parent: &Header,
        config: &AssemblerConfig,
    ) -> Result<SlotAssembly<Ordered>, AssembleError> {
        if self.references.is_empty() {
            return Err(AssembleError::NothingToAssemble {
                slot: self.target_slot,
            });
        }
        if self.references.len() > config.max_references {
            return Err(AssembleError::TooManyReferences {
                slot: self.target_slot,
                max: config.max_references,
            });
        }
        let request = BuildRequest::from_parent(
            parent,
            self.target_slot,
            config.slot_interval_secs,
            config.fee_recipient,
            self.references.clone(),
        );
        Ok(self.transition(Ordered { request }))
    }
}

// =============================================================================
// ORDERED
// =============================================================================

impl SlotAssembly<Ordered> {
    /// The derived request.
    pub fn request(&self) -> &BuildRequest {
        &self.state.request
    }

    /// Mark the request as handed to the builder.
    #[must_use = "submission consumes the ordered state"]
    pub fn submit(self) -> SlotAssembly<Submitted> {
        let request = self.state.request.clone();
        self.transition(Submitted { request })
    }
}

// =============================================================================
// SUBMITTED
// =============================================================================

impl SlotAssembly<Submitted> {
    /// The request in flight.
    pub fn request(&self) -> &BuildRequest {
        &self.state.request
    }

    /// Record the returned bid.
    #[must_use = "confirmation consumes the submitted state"]
    pub fn confirm(self, bid: Bid, tx_hash: Hash) -> SlotAssembly<Confirmed> {
        self.transition(Confirmed { bid, tx_hash })
    }

    /// Record the failure.
    #[must_use = "rejection consumes the submitted state"]
    pub fn reject(self, error: AssembleError) -> SlotAssembly<Rejected> {
        self.transition(Rejected { error })
    }
}

// =============================================================================
// TERMINAL STATES
// =============================================================================

impl SlotAssembly<Confirmed> {
    /// The bid.
    pub fn bid(&self) -> &Bid {
        &self.state.bid
    }

    /// Build transaction that issued the bid.
    pub fn tx_hash(&self) -> Hash {
        self.state.tx_hash
    }

    /// Take the bid.
    pub fn into_bid(self) -> Bid {
        self.state.bid
    }
}

impl SlotAssembly<Rejected> {
    /// Why the attempt failed.
    pub fn error(&self) -> &AssembleError {
        &self.state.error
    }

    /// Take the failure.
    pub fn into_error(self) -> AssembleError {
        self.state.error
    }

    /// Start a fresh attempt with the same references.
    #[must_use = "retry returns a new collecting state"]
    pub fn retry(self) -> SlotAssembly<Collecting> {
        self.transition(Collecting)
    }
}

/// Result of driving one slot attempt past submission.
#[derive(Debug)]
pub enum SlotOutcome {
    /// The builder returned a bid.
    Confirmed(SlotAssembly<Confirmed>),
    /// The build call failed.
    Rejected(SlotAssembly<Rejected>),
}

impl SlotOutcome {
    /// Collapse into the bid or the failure.
    pub fn into_result(self) -> Result<Bid, AssembleError> {
        match self {
            SlotOutcome::Confirmed(slot) => Ok(slot.into_bid()),
            SlotOutcome::Rejected(slot) => Err(slot.into_error()),
        }
    }
}
