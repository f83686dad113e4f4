//! # Composable Block Test Suite
//!
//! Unified test crate for flows that cross component boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # Devnet with deployed contracts and every stage
//! ├── integration/      # End-to-end pipeline and failure scenarios
//! └── properties/       # Uniqueness, capability and ordering properties
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p cb-tests
//!
//! # By category
//! cargo test -p cb-tests integration::
//! cargo test -p cb-tests properties::
//!
//! # Benchmarks
//! cargo bench -p cb-tests
//! ```

#![allow(dead_code)]

#[cfg(test)]
pub(crate) mod harness;
pub mod integration;
pub mod properties;
