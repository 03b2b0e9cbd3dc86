//! Schema bootstrap for the notepad store

use notepad_core::{Error, Result};
use rusqlite::Connection;
use std::path::Path;

/// Notepad table definition
///
/// AUTOINCREMENT keeps ids from being reused after the highest row is deleted.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS notepads (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    content TEXT NOT NULL
);
"#;

/// Prepare the on-disk location for a store
///
/// Creates missing parent directories. Returns `true` when no store file
/// existed yet, i.e. this run will create it.
pub fn prepare_location(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(true)
}

/// Create the notepad table if it is not present
pub fn bootstrap(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .map_err(|e| Error::Storage(format!("Failed to initialize schema: {}", e)))
}

/// Whether the notepad table exists on this connection
#[cfg(test)]
pub(crate) fn table_exists(conn: &Connection) -> Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'notepads'",
        [],
        |row| row.get::<_, i64>(0),
    )
    .map(|count| count > 0)
    .map_err(|e| Error::Storage(e.to_string()))
}
