//! # Shared Bus - Hint Bus
//!
//! Carries public announcements of committed payloads between the stages.
//!
//! ```text
//! ┌──────────────────┐                    ┌──────────────┐
//! │ Capability Store │                    │ Match Engine │
//! │                  │    publish()       │  Assembler   │
//! │                  │ ──────┐            │              │
//! └──────────────────┘       │            └──────────────┘
//!                            ▼                    ↑
//!                      ┌──────────────┐          │
//!                      │   Hint Bus   │          │
//!                      │              │ ─────────┘
//!                      └──────────────┘  subscribe()
//! ```
//!
//! Stages never need the bus to make progress: every stage operation also
//! returns its hint directly. Subscribers use the bus to discover work
//! published by others.

#![allow(clippy::missing_const_for_fn)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::{EventFilter, EventTopic, ProtocolEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before the oldest are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
