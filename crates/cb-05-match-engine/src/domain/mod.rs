//! # Domain Layer - Match Engine
//!
//! - `errors`: `MatchError`
//! - `request`: `MatchRequest` and payment construction

pub mod errors;
pub mod request;

pub use errors::MatchError;
pub use request::{payment_bundle, MatchRequest};
