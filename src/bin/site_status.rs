//! Site Status Binary - One-Shot Snapshot
//!
//! Computes the current status snapshot and prints it once.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin site_status
//! cargo run --release --bin site_status -- --json
//! ```
//!
//! ## Environment Variables
//!
//! - SITEPULSE_DB_PATH - SQLite database path (default: data/sitepulse.db)
//! - RUST_LOG - Logging level (optional, default: info)

use chrono::Utc;
use sitepulse::config::Config;
use sitepulse::status_core::{SqliteEventStore, StatusAggregator};
use std::env;

fn parse_json_from_args() -> bool {
    env::args().any(|arg| arg == "--json")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = Config::from_env();
    log::info!("📊 Computing status snapshot from {}", config.db_path);

    let store = SqliteEventStore::open(&config.db_path)?;

    // One-shot invocation: uptime is meaningful only for the watch runtime,
    // so it reads as zero here by construction.
    let aggregator = StatusAggregator::new(Utc::now());
    let snapshot = aggregator.snapshot(&store, Utc::now())?;

    if parse_json_from_args() {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", snapshot);
    }

    Ok(())
}
