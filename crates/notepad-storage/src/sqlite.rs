//! SQLite database for notepad storage

use crate::pool::{ConnectionPool, PoolConfig};
use crate::schema;
use notepad_core::{Error, Notepad, Result, StorageConfig};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Backend errors keep the engine's own message
fn storage_error(e: rusqlite::Error) -> Error {
    Error::Storage(e.to_string())
}

fn row_to_notepad(row: &rusqlite::Row<'_>) -> rusqlite::Result<Notepad> {
    Ok(Notepad {
        id: row.get(0)?,
        name: row.get(1)?,
        content: row.get(2)?,
    })
}

/// SQLite database wrapper with connection pooling
pub struct Database {
    pool: ConnectionPool,
    path: Option<PathBuf>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &Path, config: &StorageConfig) -> Result<Self> {
        Self::open_with_config(path, PoolConfig::from(config))
    }

    /// Open or create a database with custom pool configuration
    ///
    /// A missing store file is created along with its parent directories,
    /// then the notepad table is bootstrapped before any pool is built.
    pub fn open_with_config(path: &Path, config: PoolConfig) -> Result<Self> {
        let created = schema::prepare_location(path)?;

        // The pool retries open errors until its connection timeout, so an
        // unusable store must fail here on a single direct connection.
        let conn = Connection::open(path).map_err(storage_error)?;
        conn.busy_timeout(config.busy_timeout)
            .map_err(storage_error)?;
        schema::bootstrap(&conn)?;
        drop(conn);

        let pool = ConnectionPool::new(path, config)?;

        if created {
            info!(path = %path.display(), "Created notepad store");
        } else {
            info!(path = %path.display(), "Opened existing notepad store");
        }

        Ok(Self {
            pool,
            path: Some(path.to_path_buf()),
        })
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let pool = ConnectionPool::in_memory(PoolConfig::for_testing())?;
        schema::bootstrap(&*pool.get()?)?;
        Ok(Self { pool, path: None })
    }

    /// Path of the backing file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Execute a query with a connection from the pool
    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T>,
    {
        let conn = self.pool.get()?;
        f(&conn)
    }

    /// Insert a notepad and return its newly assigned id
    pub fn insert_notepad(&self, name: &str, content: &str) -> Result<i64> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO notepads (name, content) VALUES (?1, ?2)",
            params![name, content],
        )
        .map_err(storage_error)?;

        let id = conn.last_insert_rowid();
        debug!(id, name, "Inserted notepad");
        Ok(id)
    }

    /// Delete a notepad by id
    ///
    /// Returns `false` when no row matched.
    pub fn delete_notepad(&self, id: i64) -> Result<bool> {
        let conn = self.pool.get()?;
        let affected = conn
            .execute("DELETE FROM notepads WHERE id = ?1", params![id])
            .map_err(storage_error)?;

        debug!(id, affected, "Deleted notepad");
        Ok(affected > 0)
    }

    /// Replace the content of a notepad
    ///
    /// Returns `false` when no row matched.
    pub fn update_notepad_content(&self, id: i64, content: &str) -> Result<bool> {
        let conn = self.pool.get()?;
        let affected = conn
            .execute(
                "UPDATE notepads SET content = ?1 WHERE id = ?2",
                params![content, id],
            )
            .map_err(storage_error)?;

        debug!(id, affected, "Updated notepad content");
        Ok(affected > 0)
    }

    /// List all notepads in id order
    pub fn list_notepads(&self) -> Result<Vec<Notepad>> {
        let conn = self.pool.get()?;
        let mut stmt = conn
            .prepare("SELECT id, name, content FROM notepads ORDER BY id")
            .map_err(storage_error)?;

        let rows = stmt
            .query_map([], row_to_notepad)
            .map_err(storage_error)?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage_error)
    }

    /// Get a single notepad by id
    pub fn get_notepad(&self, id: i64) -> Result<Option<Notepad>> {
        let conn = self.pool.get()?;
        conn.query_row(
            "SELECT id, name, content FROM notepads WHERE id = ?1",
            params![id],
            row_to_notepad,
        )
        .optional()
        .map_err(storage_error)
    }
}
