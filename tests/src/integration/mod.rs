//! # Integration Tests
//!
//! - `e2e_pipeline`: submission through bid on one devnet
//! - `failure_scenarios`: every stage refusing or reverting without side effects

pub mod e2e_pipeline;
pub mod failure_scenarios;
