//! Notepad Storage - SQLite storage layer
//!
//! This crate provides persistent storage for notepad rows, including
//! schema bootstrap and connection pooling.

pub mod pool;
pub mod schema;
pub mod sqlite;

pub use pool::{ConnectionPool, PoolConfig};
pub use sqlite::Database;
