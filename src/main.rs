
pub mod config;
pub mod sqlite_pragma;
pub mod status_core;

use {
    chrono::Utc,
    config::Config,
    status_core::{SqliteEventStore, StatusAggregator},
    tokio::time::{interval, Duration},
};

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();

    // Initialize logger if RUST_LOG is set
    // Write logs to stderr so the snapshot output on stdout stays clean
    let mut builder = if config.rust_log.is_some() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
    } else {
        env_logger::Builder::from_default_env()
    };
    builder.target(env_logger::Target::Stderr).init();

    log::info!("🚀 Starting sitepulse status watch...");
    log::info!("📊 Configuration:");
    log::info!("   DB path: {}", config.db_path);
    log::info!("   Refresh interval: {}s", config.refresh_interval_secs);

    let store = SqliteEventStore::open(&config.db_path)?;

    // Process start is captured once and injected; uptime is measured from here
    let aggregator = StatusAggregator::new(Utc::now());

    let mut ticker = interval(Duration::from_secs(config.refresh_interval_secs));
    loop {
        ticker.tick().await;

        match aggregator.snapshot(&store, Utc::now()) {
            Ok(snapshot) => println!("{}\n", snapshot),
            Err(e) => log::error!("❌ Snapshot computation failed: {}", e),
        }
    }
}
