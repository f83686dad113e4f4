//! # Composer Runtime
//!
//! Drives the composable block pipeline end to end on an in-process devnet.
//!
//! ## Modules
//!
//! - `config` - `RuntimeConfig` and `CB_*` environment overrides
//! - `pipeline` - the ordered pipeline steps
//!
//! ## Environment
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `CB_FUNDED_KEY` | hex private key of the funded account |
//! | `CB_BUNDLE_COUNT` | bundles sent per run |
//! | `CB_TARGET_SLOT` | slot every artifact targets |
//! | `CB_LOG_LEVEL` | `trace` ... `error` |

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod pipeline;

pub use config::{apply_overrides, load_config, RuntimeConfig};
pub use pipeline::{Pipeline, PipelineReport, Step};
