//! # Domain Layer - Bundle Submitter
//!
//! - `errors`: `SubmitError`, `InvalidBundle`
//! - `validation`: pre-commit bundle checks

pub mod errors;
pub mod validation;

pub use errors::{InvalidBundle, SubmitError};
pub use validation::validate;
