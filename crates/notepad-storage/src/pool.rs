//! SQLite connection pool using r2d2
//!
//! Every connection the pool opens gets the store's busy timeout, and
//! file-backed connections switch to WAL journaling. r2d2 runs this once per
//! new connection, not on each checkout.

use notepad_core::{Error, Result, StorageConfig};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counter for naming in-memory stores so pools never share one
static MEMORY_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Configuration for the connection pool
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of open connections
    pub max_size: u32,
    /// Timeout for acquiring a connection from the pool
    pub connection_timeout: Duration,
    /// SQLite busy timeout applied to each connection
    pub busy_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 4,
            connection_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_millis(5000),
        }
    }
}

impl PoolConfig {
    /// Short timeouts for test stores
    pub fn for_testing() -> Self {
        Self {
            max_size: 4,
            connection_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_millis(1000),
        }
    }
}

impl From<&StorageConfig> for PoolConfig {
    fn from(config: &StorageConfig) -> Self {
        Self {
            max_size: config.pool_max_size,
            busy_timeout: Duration::from_millis(config.busy_timeout_ms),
            ..Default::default()
        }
    }
}

#[derive(Debug)]
struct NotepadConnectionSetup {
    busy_timeout: Duration,
    /// Shared-cache in-memory stores cannot use WAL
    wal: bool,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for NotepadConnectionSetup {
    fn on_acquire(&self, conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.busy_timeout(self.busy_timeout)?;
        if self.wal {
            conn.execute_batch(
                "PRAGMA journal_mode=WAL;
                 PRAGMA synchronous=NORMAL;",
            )?;
        }
        Ok(())
    }
}

/// Pool of connections to one notepad store
pub struct ConnectionPool {
    pool: Pool<SqliteConnectionManager>,
}

impl ConnectionPool {
    /// Pool connections to the store file at `path`
    pub fn new(path: &Path, config: PoolConfig) -> Result<Self> {
        Self::build(SqliteConnectionManager::file(path), config, true)
    }

    /// Pool connections to a fresh in-memory store (for testing)
    ///
    /// A plain `:memory:` connection is private, so the store is opened
    /// through a uniquely named shared-cache URI instead.
    pub fn in_memory(config: PoolConfig) -> Result<Self> {
        let db_id = MEMORY_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let uri = format!("file:notepads{}?mode=memory&cache=shared", db_id);
        Self::build(SqliteConnectionManager::file(&uri), config, false)
    }

    fn build(manager: SqliteConnectionManager, config: PoolConfig, wal: bool) -> Result<Self> {
        let setup = NotepadConnectionSetup {
            busy_timeout: config.busy_timeout,
            wal,
        };

        // min_idle of 1 keeps a shared-cache memory store alive between calls
        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(Some(1))
            .connection_timeout(config.connection_timeout)
            .connection_customizer(Box::new(setup))
            .build(manager)
            .map_err(|e| Error::Storage(format!("Failed to create connection pool: {}", e)))?;

        Ok(Self { pool })
    }

    /// Check out a connection
    pub fn get(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| Error::Storage(format!("Failed to get connection from pool: {}", e)))
    }
}
