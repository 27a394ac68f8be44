//! SQLite-backed event store
//!
//! One schema shared by the write side (request tracking) and the read side
//! (status aggregation). Tables are created idempotently so whichever side
//! opens the database first establishes the layout.

use super::event::{EngagementFacts, ErrorEvent, PageView};
use crate::sqlite_pragma::apply_optimized_pragmas;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

#[derive(Debug)]
pub enum StoreError {
    Database(rusqlite::Error),
    Io(std::io::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(err)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Database(e) => write!(f, "Database error: {}", e),
            StoreError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// Event store over the platform's shared SQLite database
pub struct SqliteEventStore {
    conn: Connection,
}

impl SqliteEventStore {
    /// Open (or create) the database and ensure the schema exists
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;

        // Apply optimized PRAGMAs (WAL, NORMAL, MEMORY, mmap, cache, autocheckpoint)
        apply_optimized_pragmas(&conn)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS page_views (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                path TEXT NOT NULL,
                visitor_id TEXT NOT NULL,
                user_id INTEGER,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS error_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                path TEXT NOT NULL,
                message TEXT,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                status TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS post_likes (
                post_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL
            )",
            [],
        )?;

        // Indexes for the aggregation queries
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_page_views_created_at
             ON page_views(created_at DESC)",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_page_views_visitor
             ON page_views(visitor_id)",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_error_logs_created_at
             ON error_logs(created_at DESC)",
            [],
        )?;

        log::info!("✅ SQLite event store initialized with WAL mode");

        Ok(Self { conn })
    }

    // --- write side (append-only) ---

    /// Append one page view. Events are never updated afterwards.
    pub fn append_page_view(&self, view: &PageView) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO page_views (path, visitor_id, user_id, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![view.path, view.visitor_id, view.user_id, view.created_at],
        )?;
        Ok(())
    }

    /// Append one error event. Events are never updated afterwards.
    pub fn append_error(&self, event: &ErrorEvent) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO error_logs (path, message, created_at)
             VALUES (?1, ?2, ?3)",
            params![event.path, event.message, event.created_at],
        )?;
        Ok(())
    }

    /// Insert a post row (content side owns these; exposed for parity and tests)
    pub fn insert_post(&self, status: &str) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO posts (status) VALUES (?1)",
            params![status],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a like-edge (content side owns these; exposed for parity and tests)
    pub fn insert_post_like(&self, post_id: i64, user_id: i64) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO post_likes (post_id, user_id) VALUES (?1, ?2)",
            params![post_id, user_id],
        )?;
        Ok(())
    }

    // --- read side (aggregation queries) ---

    /// Lifetime page-view count
    pub fn total_views(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(id) FROM page_views", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Lifetime distinct visitor count
    pub fn unique_visitors(&self) -> Result<u64, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT visitor_id) FROM page_views",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Published-post and like-edge counts from the content dataset
    pub fn engagement_facts(&self) -> Result<EngagementFacts, StoreError> {
        let published_posts: i64 = self.conn.query_row(
            "SELECT COUNT(id) FROM posts WHERE status = 'active'",
            [],
            |row| row.get(0),
        )?;
        let post_likes: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM post_likes", [], |row| row.get(0))?;

        Ok(EngagementFacts {
            published_posts: published_posts as u64,
            post_likes: post_likes as u64,
        })
    }

    /// Page views at or after `cutoff` (unix seconds)
    pub fn views_since(&self, cutoff: i64) -> Result<u64, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(id) FROM page_views WHERE created_at >= ?1",
            [cutoff],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Most-viewed path at or after `cutoff`, with its count
    ///
    /// Ties break on lexicographic path order so the result is deterministic.
    /// Returns None when the window holds no views.
    pub fn top_page_since(&self, cutoff: i64) -> Result<Option<(String, u64)>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT path, COUNT(id) AS view_count FROM page_views
                 WHERE created_at >= ?1
                 GROUP BY path
                 ORDER BY view_count DESC, path ASC
                 LIMIT 1",
                [cutoff],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;
        Ok(row.map(|(path, count)| (path, count as u64)))
    }

    /// (visitor_id, created_at) pairs at or after `cutoff`, for session grouping
    pub fn visitor_timestamps_since(
        &self,
        cutoff: i64,
    ) -> Result<Vec<(String, i64)>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT visitor_id, created_at FROM page_views
             WHERE created_at >= ?1
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([cutoff], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Error events at or after `cutoff` (unix seconds)
    pub fn errors_since(&self, cutoff: i64) -> Result<u64, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(id) FROM error_logs WHERE created_at >= ?1",
            [cutoff],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_scratch_store() -> (tempfile::TempDir, SqliteEventStore) {
        let dir = tempdir().unwrap();
        let store = SqliteEventStore::open(dir.path().join("test.db")).unwrap();
        (dir, store)
    }

    fn view(path: &str, visitor: &str, at: i64) -> PageView {
        PageView {
            path: path.to_string(),
            visitor_id: visitor.to_string(),
            user_id: None,
            created_at: at,
        }
    }

    #[test]
    fn test_schema_is_idempotent() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        let store = SqliteEventStore::open(&db_path).unwrap();
        store.append_page_view(&view("/", "v1", 1000)).unwrap();
        drop(store);

        // Reopening must not clobber existing rows
        let store = SqliteEventStore::open(&db_path).unwrap();
        assert_eq!(store.total_views().unwrap(), 1);
    }

    #[test]
    fn test_counts_and_distinct_visitors() {
        let (_dir, store) = open_scratch_store();

        for i in 0..100 {
            store.append_page_view(&view("/blog", "repeat", 1000 + i)).unwrap();
        }
        store.append_page_view(&view("/blog", "other", 2000)).unwrap();

        assert_eq!(store.total_views().unwrap(), 101);
        assert_eq!(store.unique_visitors().unwrap(), 2);
    }

    #[test]
    fn test_window_queries_respect_cutoff() {
        let (_dir, store) = open_scratch_store();

        store.append_page_view(&view("/old", "v1", 100)).unwrap();
        store.append_page_view(&view("/new", "v2", 5000)).unwrap();
        store.append_page_view(&view("/new", "v3", 6000)).unwrap();

        assert_eq!(store.views_since(1000).unwrap(), 2);
        let (path, count) = store.top_page_since(1000).unwrap().unwrap();
        assert_eq!(path, "/new");
        assert_eq!(count, 2);

        let rows = store.visitor_timestamps_since(1000).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ("v2".to_string(), 5000));
    }

    #[test]
    fn test_top_page_tie_breaks_on_path() {
        let (_dir, store) = open_scratch_store();

        store.append_page_view(&view("/b", "v1", 1000)).unwrap();
        store.append_page_view(&view("/a", "v2", 1001)).unwrap();

        let (path, _) = store.top_page_since(0).unwrap().unwrap();
        assert_eq!(path, "/a");
    }

    #[test]
    fn test_top_page_empty_window() {
        let (_dir, store) = open_scratch_store();
        assert!(store.top_page_since(0).unwrap().is_none());
    }

    #[test]
    fn test_engagement_facts_count_active_posts_only() {
        let (_dir, store) = open_scratch_store();

        let published = store.insert_post("active").unwrap();
        store.insert_post("pending").unwrap();
        store.insert_post_like(published, 1).unwrap();
        store.insert_post_like(published, 2).unwrap();

        let facts = store.engagement_facts().unwrap();
        assert_eq!(facts.published_posts, 1);
        assert_eq!(facts.post_likes, 2);
    }

    #[test]
    fn test_errors_since() {
        let (_dir, store) = open_scratch_store();

        store
            .append_error(&ErrorEvent {
                path: "/post/9".to_string(),
                message: Some("boom".to_string()),
                created_at: 100,
            })
            .unwrap();
        store
            .append_error(&ErrorEvent {
                path: "/post/9".to_string(),
                message: None,
                created_at: 900,
            })
            .unwrap();

        assert_eq!(store.errors_since(0).unwrap(), 2);
        assert_eq!(store.errors_since(500).unwrap(), 1);
    }
}
