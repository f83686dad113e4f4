//! # CB-04: Meta-Bundle Aggregator
//!
//! Composes previously committed references into a meta-bundle carrying a
//! clearing value and fee recipient.
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Empty compositions issue nothing | `service.rs` - checked before any send |
//! | Children exist | `ReferenceDirectory::exists` before send, contract on execution |
//! | Children untouched | only references are embedded, payloads are never read |

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use config::AggregatorConfig;
pub use domain::AggregateError;
pub use ports::MetaBundleAggregatorApi;
pub use service::MetaBundleAggregator;
