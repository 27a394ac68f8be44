//! The computed status snapshot

use serde::{Deserialize, Serialize};

/// One complete, immutable set of computed site metrics
///
/// Every field is pre-formatted for direct display; the field names and their
/// shapes are the contract with the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Lifetime page views, thousands-separated
    pub total_views: String,
    /// Lifetime distinct visitors, thousands-separated
    pub unique_visitors: String,
    /// Currently published posts, thousands-separated
    pub published_posts: String,
    /// Likes per view, one decimal, e.g. "25.0%"
    pub engagement_rate: String,
    /// Page views in the trailing 24 hours, thousands-separated
    pub views_last_24h: String,
    /// Most-viewed path in the trailing 24 hours, or "No traffic yet"
    pub top_page: String,
    /// Mean session duration, e.g. "5m 30s"
    pub avg_time_display: String,
    /// Single-view visitors over distinct visitors, one decimal
    pub bounce_rate: String,
    /// Errors since UTC midnight, thousands-separated
    pub errors_today: String,
    /// Constant "100.00%"; no downtime history is kept
    pub uptime_percent: String,
    /// Whole seconds since process start
    pub uptime_seconds: i64,
    /// HH:MM stamp of the computation instant
    pub last_update: String,
}

impl std::fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Site status ({})", self.last_update)?;
        writeln!(f, "  Total views:      {}", self.total_views)?;
        writeln!(f, "  Unique visitors:  {}", self.unique_visitors)?;
        writeln!(f, "  Published posts:  {}", self.published_posts)?;
        writeln!(f, "  Engagement rate:  {}", self.engagement_rate)?;
        writeln!(f, "  Views (24h):      {}", self.views_last_24h)?;
        writeln!(f, "  Top page (24h):   {}", self.top_page)?;
        writeln!(f, "  Avg time on site: {}", self.avg_time_display)?;
        writeln!(f, "  Bounce rate:      {}", self.bounce_rate)?;
        writeln!(f, "  Errors today:     {}", self.errors_today)?;
        write!(
            f,
            "  Uptime:           {} ({}s)",
            self.uptime_percent, self.uptime_seconds
        )
    }
}
