//! # Composer Runtime
//!
//! Entry point of the demo pipeline.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, then `CB_*` environment)
//! 2. Install logging at the configured level
//! 3. Start the devnet and run every pipeline step
//! 4. Print the report as JSON

use anyhow::{Context, Result};
use composer_runtime::{load_config, Pipeline};
use std::str::FromStr;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config();

    let level = Level::from_str(&config.log_level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    if !config.log_level.eq_ignore_ascii_case(&level.to_string()) {
        warn!(requested = %config.log_level, "Unknown log level, using INFO");
    }

    info!(
        chain_id = config.settlement.chain_id,
        bundles = config.bundle_count,
        "Starting composable block pipeline"
    );
    let report = Pipeline::new(config).run().await?;

    info!(
        slot = report.target_slot,
        bid = %report.bid.data_ref,
        hints = report.hints_observed,
        "Pipeline complete"
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("encoding the report")?
    );
    Ok(())
}
