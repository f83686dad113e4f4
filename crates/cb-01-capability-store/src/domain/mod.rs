//! # Domain Layer - Capability Store
//!
//! - `entities`: the stored payload record
//! - `errors`: `StoreError`

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
