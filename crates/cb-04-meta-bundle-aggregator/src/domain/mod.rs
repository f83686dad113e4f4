//! # Domain Layer - Meta-Bundle Aggregator
//!
//! - `errors`: `AggregateError`
//! - `placeholder`: synthetic payment embedded in the payload

pub mod errors;
pub mod placeholder;

pub use errors::AggregateError;
pub use placeholder::placeholder_bundle;
