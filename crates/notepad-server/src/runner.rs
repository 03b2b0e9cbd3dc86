//! Server runner for managing the MCP server lifecycle
//!
//! This module provides a `ServerRunner` that opens the notepad store,
//! binds the server to the stdio transport, and shuts everything down on
//! EOF or Ctrl-C.

use crate::NotepadServer;
use notepad_core::{Result, StorageConfig};
use notepad_storage::Database;
use rmcp::ServiceExt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Configuration for the server runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path of the SQLite store
    pub db_path: PathBuf,
    /// Storage tuning (pool size, busy timeout)
    pub storage: StorageConfig,
    /// Use in-memory storage (for testing)
    pub in_memory: bool,
}

impl RunnerConfig {
    /// Create a new config for the store at `db_path`
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            storage: StorageConfig::default(),
            in_memory: false,
        }
    }

    /// Set the storage configuration
    pub fn storage(mut self, storage: StorageConfig) -> Self {
        self.storage = storage;
        self
    }

    /// Use in-memory storage
    pub fn in_memory(mut self, enabled: bool) -> Self {
        self.in_memory = enabled;
        self
    }
}

/// Server runner combining storage, server, and transport
pub struct ServerRunner {
    config: RunnerConfig,
    server: NotepadServer,
}

impl ServerRunner {
    /// Create a new server runner, opening (and bootstrapping) the store
    pub fn new(config: RunnerConfig) -> Result<Self> {
        let db = if config.in_memory {
            Database::in_memory()?
        } else {
            Database::open(&config.db_path, &config.storage)?
        };

        let server = NotepadServer::new(Arc::new(db));
        Ok(Self { config, server })
    }

    /// Get a reference to the underlying server
    pub fn server(&self) -> &NotepadServer {
        &self.server
    }

    /// Run the server with stdio transport
    ///
    /// Serves requests until stdin reaches EOF or Ctrl-C is received, then
    /// closes the transport and the storage pool.
    pub async fn run(self) -> std::result::Result<(), anyhow::Error> {
        info!(
            "Notepad server starting (store: {})",
            self.config.db_path.display()
        );

        debug!("Available tools:");
        for tool in self.server.list_tools() {
            debug!("  - {}: {}", tool.name, tool.description.unwrap_or_default());
        }

        info!("Starting MCP protocol over stdio...");

        let transport = rmcp::transport::stdio();
        let service = self.server.clone().serve(transport).await?;

        info!("MCP server ready, waiting for requests...");

        // Ctrl-C cancels the running service, which closes the transport
        let cancel = service.cancellation_token();
        let signal_handle = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Interrupt received, shutting down...");
                    cancel.cancel();
                }
                Err(e) => error!("Failed to listen for interrupt signal: {}", e),
            }
        });

        let outcome = service.waiting().await;
        signal_handle.abort();

        match outcome {
            Ok(reason) => debug!(?reason, "MCP service stopped"),
            Err(e) => {
                error!("Service error: {}", e);
                return Err(e.into());
            }
        }

        info!("Closing notepad store...");
        drop(self);

        info!("Notepad server shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_config_builder() {
        let storage = StorageConfig {
            pool_max_size: 2,
            ..Default::default()
        };
        let config = RunnerConfig::new(PathBuf::from("/tmp/notepads.db"))
            .storage(storage)
            .in_memory(true);

        assert_eq!(config.db_path, PathBuf::from("/tmp/notepads.db"));
        assert_eq!(config.storage.pool_max_size, 2);
        assert!(config.in_memory);
    }

    #[test]
    fn test_runner_creation_in_memory() {
        let config = RunnerConfig::new(PathBuf::from("unused.db")).in_memory(true);
        let runner = ServerRunner::new(config).unwrap();
        assert!(runner.server().db.path().is_none());
    }

    #[test]
    fn test_runner_creates_store_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh").join("notepads.db");

        let runner = ServerRunner::new(RunnerConfig::new(path.clone())).unwrap();
        assert!(path.exists());
        assert_eq!(runner.server().db.path(), Some(path.as_path()));
    }
}
