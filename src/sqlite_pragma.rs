//! Shared SQLite PRAGMA tuning
//!
//! Applied by every connection opener so the writer (request tracking) and the
//! reader (status aggregation) agree on journal mode and cache behavior.

use rusqlite::Connection;

/// Apply optimized PRAGMAs (WAL, NORMAL, MEMORY, mmap, cache, autocheckpoint)
pub fn apply_optimized_pragmas(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "temp_store", "MEMORY")?;
    conn.pragma_update(None, "mmap_size", 268_435_456_i64)?;
    conn.pragma_update(None, "cache_size", -64_000_i64)?;
    conn.pragma_update(None, "wal_autocheckpoint", 1_000_i64)?;
    Ok(())
}
