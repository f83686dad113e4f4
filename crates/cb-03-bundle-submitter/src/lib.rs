//! # CB-03: Bundle Submitter
//!
//! Validates signed bundles and commits them through the BasicBundle
//! contract, returning the issued [`DataReference`] and its hint.
//!
//! ## Validation
//!
//! | Check | Failure |
//! |-------|---------|
//! | at least one transaction | `InvalidBundle::Empty` |
//! | size within `max_bundle_size` | `InvalidBundle::TooLarge` |
//! | recoverable signatures | `InvalidBundle::MalformedSignature` |
//! | grant reveals at the bundle's target slot | `InvalidBundle::SlotMismatch` |
//!
//! Transactions are never reordered.
//!
//! [`DataReference`]: shared_types::DataReference

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod domain;
pub mod generator;
pub mod ports;
pub mod service;

pub use config::SubmitterConfig;
pub use domain::{InvalidBundle, SubmitError};
pub use generator::BundleGenerator;
pub use ports::BundleSubmitterApi;
pub use service::BundleSubmitter;
