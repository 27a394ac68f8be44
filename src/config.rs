//! Runtime configuration from environment variables

use std::env;

/// Configuration for the status watch runtime
///
/// Loaded from environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the shared SQLite database file
    pub db_path: String,

    /// How often the watch loop recomputes the snapshot, in seconds
    pub refresh_interval_secs: u64,

    /// RUST_LOG value, if set (used to pick the logger builder)
    pub rust_log: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `SITEPULSE_DB_PATH` (default: data/sitepulse.db)
    /// - `STATUS_REFRESH_INTERVAL_SECS` (default: 60)
    /// - `RUST_LOG` (optional)
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("SITEPULSE_DB_PATH")
                .unwrap_or_else(|_| "data/sitepulse.db".to_string()),

            refresh_interval_secs: env::var("STATUS_REFRESH_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),

            rust_log: env::var("RUST_LOG").ok(),
        }
    }
}
