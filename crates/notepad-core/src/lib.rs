//! Notepad Core - Configuration, error types, and shared data types
//!
//! This crate provides the foundational types used across all notepad-mcp
//! crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, ServerConfig, StorageConfig};
pub use error::{Error, Result};
pub use types::Notepad;
