//! Stored payload record.

use shared_types::{CapabilityGrant, PayloadKind};

/// A committed payload. Immutable once inserted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredPayload {
    /// Opaque payload bytes
    pub payload: Vec<u8>,
    /// Visibility rules fixed at commit
    pub grant: CapabilityGrant,
    /// What the payload is
    pub kind: PayloadKind,
    /// Slot at which the commit happened
    pub committed_at: u64,
}
