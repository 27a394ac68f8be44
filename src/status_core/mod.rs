//! Status Core - Site-Status Aggregation Engine
//!
//! This module computes the admin status page metrics from the platform's
//! append-only page-view and error logs plus the post/like dataset.
//!
//! # Architecture
//!
//! ```text
//! Request handling → PageViewTracker → SqliteEventStore (append-only log)
//!     ↓
//! SqliteEventStore → StatusAggregator (lifetime + 24h window queries)
//!     ↓
//! SessionStats (per-visitor grouping, bounces, durations)
//!     ↓
//! StatusSnapshot (display-formatted, immutable)
//! ```
//!
//! The aggregator owns no state beyond the injected process-start instant and
//! never writes; the tracker owns no state and never reads. Both sides share
//! one SQLite schema created idempotently by the store.

pub mod aggregator;
pub mod event;
pub mod format;
pub mod sessions;
pub mod snapshot;
pub mod store;
pub mod tracker;
pub mod visitor;

pub use aggregator::{StatusAggregator, NO_TRAFFIC_SENTINEL, RECENT_WINDOW_SECS};
pub use event::{EngagementFacts, ErrorEvent, PageView, MAX_ERROR_MESSAGE_LEN};
pub use sessions::SessionStats;
pub use snapshot::StatusSnapshot;
pub use store::{SqliteEventStore, StoreError};
pub use tracker::{should_track, EventSink, PageViewTracker};
pub use visitor::build_visitor_id;
