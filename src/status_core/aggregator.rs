//! Status aggregator
//!
//! Pure read-and-compute: given the current instant and the event store, derive
//! one complete snapshot. No caching, no persistence of its own; safe to invoke
//! concurrently because every input is an append-only log.

use super::format::{
    format_clock, format_count, format_duration, format_percent, format_uptime_percent,
};
use super::sessions::SessionStats;
use super::snapshot::StatusSnapshot;
use super::store::{SqliteEventStore, StoreError};
use chrono::{DateTime, Utc};

/// Reference window for "recent" metrics
pub const RECENT_WINDOW_SECS: i64 = 24 * 60 * 60;

/// Reported as `top_page` when the window holds no views
pub const NO_TRAFFIC_SENTINEL: &str = "No traffic yet";

/// Computes status snapshots against an event store
///
/// The process-start instant is injected here rather than read from ambient
/// global state, so uptime stays testable.
pub struct StatusAggregator {
    process_start: DateTime<Utc>,
}

impl StatusAggregator {
    pub fn new(process_start: DateTime<Utc>) -> Self {
        Self { process_start }
    }

    /// Compute one snapshot at `now`
    ///
    /// Either returns a complete snapshot or propagates the first store error
    /// untouched. Zero denominators never raise; they resolve to 0 or the
    /// no-traffic sentinel.
    pub fn snapshot(
        &self,
        store: &SqliteEventStore,
        now: DateTime<Utc>,
    ) -> Result<StatusSnapshot, StoreError> {
        let now_ts = now.timestamp();
        let window_start = now_ts - RECENT_WINDOW_SECS;

        let total_views = store.total_views()?;
        let unique_visitors = store.unique_visitors()?;
        let facts = store.engagement_facts()?;

        let engagement_rate = if total_views == 0 {
            0.0
        } else {
            facts.post_likes as f64 / total_views as f64 * 100.0
        };

        let views_last_24h = store.views_since(window_start)?;
        let top_page = store
            .top_page_since(window_start)?
            .map(|(path, _)| path)
            .unwrap_or_else(|| NO_TRAFFIC_SENTINEL.to_string());

        let sessions = SessionStats::from_rows(&store.visitor_timestamps_since(window_start)?);

        // Timestamps are UTC unix seconds, so flooring to the day gives
        // today's midnight without a calendar round trip.
        let midnight = now_ts - now_ts.rem_euclid(86_400);
        let errors_today = store.errors_since(midnight)?;

        let uptime_seconds = (now - self.process_start).num_seconds();

        Ok(StatusSnapshot {
            total_views: format_count(total_views),
            unique_visitors: format_count(unique_visitors),
            published_posts: format_count(facts.published_posts),
            engagement_rate: format_percent(engagement_rate),
            views_last_24h: format_count(views_last_24h),
            top_page,
            avg_time_display: format_duration(sessions.avg_session_secs()),
            bounce_rate: format_percent(sessions.bounce_rate()),
            errors_today: format_count(errors_today),
            // No historical downtime tracking exists; a constant, not an SLA.
            uptime_percent: format_uptime_percent(100.0),
            uptime_seconds,
            last_update: format_clock(now),
        })
    }
}
