//! Write-side collaborator: request tracking
//!
//! Appends a page view for every qualifying navigational request and an error
//! event for every unhandled failure. Writes are best effort: a logging
//! failure is reported and swallowed so the original request never aborts.

use super::event::{ErrorEvent, PageView, MAX_ERROR_MESSAGE_LEN};
use super::store::{SqliteEventStore, StoreError};
use super::visitor::build_visitor_id;
use async_trait::async_trait;

/// Whether a request qualifies for page-view tracking
///
/// Only GET requests outside the static/admin/api prefixes are tracked.
pub fn should_track(method: &str, path: &str) -> bool {
    if method != "GET" {
        return false;
    }
    !(path.starts_with("/static") || path.starts_with("/admin") || path.starts_with("/api"))
}

/// Backend trait for appending events
#[async_trait]
pub trait EventSink: Send {
    /// Append a single page view
    async fn append_page_view(&mut self, view: &PageView) -> Result<(), StoreError>;

    /// Append a single error event
    async fn append_error(&mut self, event: &ErrorEvent) -> Result<(), StoreError>;

    /// Get sink type for logging
    fn sink_type(&self) -> &'static str;
}

#[async_trait]
impl EventSink for SqliteEventStore {
    async fn append_page_view(&mut self, view: &PageView) -> Result<(), StoreError> {
        SqliteEventStore::append_page_view(self, view)
    }

    async fn append_error(&mut self, event: &ErrorEvent) -> Result<(), StoreError> {
        SqliteEventStore::append_error(self, event)
    }

    fn sink_type(&self) -> &'static str {
        "sqlite"
    }
}

/// Best-effort event recorder in front of a sink
pub struct PageViewTracker<S: EventSink> {
    sink: S,
}

impl<S: EventSink> PageViewTracker<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Record a page view if the request qualifies
    ///
    /// Returns true when a row was appended. Sink failures are logged at warn
    /// and reported as false, never propagated.
    pub async fn record_page_view(
        &mut self,
        method: &str,
        path: &str,
        user_id: Option<i64>,
        remote_addr: &str,
        user_agent: &str,
        now: i64,
    ) -> bool {
        if !should_track(method, path) {
            return false;
        }

        let view = PageView {
            path: path.to_string(),
            visitor_id: build_visitor_id(user_id, remote_addr, user_agent),
            user_id,
            created_at: now,
        };

        match self.sink.append_page_view(&view).await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to record page view for {}: {}", view.path, e);
                false
            }
        }
    }

    /// Record an unhandled request failure
    ///
    /// The message is truncated to 300 characters. Same best-effort semantics
    /// as page views.
    pub async fn record_error(&mut self, path: &str, message: &str, now: i64) -> bool {
        let truncated: String = message.chars().take(MAX_ERROR_MESSAGE_LEN).collect();
        let event = ErrorEvent {
            path: path.to_string(),
            message: Some(truncated),
            created_at: now,
        };

        match self.sink.append_error(&event).await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to record error for {}: {}", event.path, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_should_track_filters() {
        assert!(should_track("GET", "/"));
        assert!(should_track("GET", "/post/42"));

        assert!(!should_track("POST", "/post/42"));
        assert!(!should_track("GET", "/static/css/site.css"));
        assert!(!should_track("GET", "/admin/site-status"));
        assert!(!should_track("GET", "/api/search"));
    }

    #[tokio::test]
    async fn test_record_page_view_appends_row() {
        let dir = tempdir().unwrap();
        let store = SqliteEventStore::open(dir.path().join("test.db")).unwrap();
        let mut tracker = PageViewTracker::new(store);

        let recorded = tracker
            .record_page_view("GET", "/blog", Some(3), "10.0.0.1", "Mozilla/5.0", 1_000)
            .await;
        assert!(recorded);

        let skipped = tracker
            .record_page_view("GET", "/api/search", None, "10.0.0.1", "Mozilla/5.0", 1_001)
            .await;
        assert!(!skipped);
    }

    #[tokio::test]
    async fn test_record_error_truncates_message() {
        struct Capture {
            last_message: Option<String>,
        }

        #[async_trait]
        impl EventSink for Capture {
            async fn append_page_view(&mut self, _view: &PageView) -> Result<(), StoreError> {
                Ok(())
            }

            async fn append_error(&mut self, event: &ErrorEvent) -> Result<(), StoreError> {
                self.last_message = event.message.clone();
                Ok(())
            }

            fn sink_type(&self) -> &'static str {
                "capture"
            }
        }

        let mut tracker = PageViewTracker::new(Capture { last_message: None });
        let long_message = "x".repeat(500);

        tracker.record_error("/post/9", &long_message, 1_000).await;

        let stored = tracker.sink.last_message.take().unwrap();
        assert_eq!(stored.len(), MAX_ERROR_MESSAGE_LEN);
    }

    #[tokio::test]
    async fn test_sink_failure_is_swallowed() {
        struct Failing;

        #[async_trait]
        impl EventSink for Failing {
            async fn append_page_view(&mut self, _view: &PageView) -> Result<(), StoreError> {
                Err(StoreError::Database(rusqlite::Error::InvalidQuery))
            }

            async fn append_error(&mut self, _event: &ErrorEvent) -> Result<(), StoreError> {
                Err(StoreError::Database(rusqlite::Error::InvalidQuery))
            }

            fn sink_type(&self) -> &'static str {
                "failing"
            }
        }

        let mut tracker = PageViewTracker::new(Failing);

        // Failures report false instead of propagating
        assert!(
            !tracker
                .record_page_view("GET", "/", None, "10.0.0.1", "Mozilla/5.0", 1_000)
                .await
        );
        assert!(!tracker.record_error("/", "boom", 1_000).await);
    }
}
