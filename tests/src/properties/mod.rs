//! # Property Tests
//!
//! - `uniqueness`: references are never reused
//! - `capability`: grants only ever widen along the pipeline
//! - `ordering`: references build into a deterministic transaction order

pub mod capability;
pub mod ordering;
pub mod uniqueness;
