//! Error types for notepad-mcp

use thiserror::Error;

/// Main error type for notepad-mcp operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl Error {
    /// Not-found error for a notepad id
    pub fn notepad_not_found(id: i64) -> Self {
        Self::NotFound(format!("Notepad with ID {} not found", id))
    }

    /// Invalid-arguments error for a tool call
    pub fn invalid_arguments(tool: &str, detail: impl std::fmt::Display) -> Self {
        Self::InvalidArgument(format!("Invalid arguments for {}: {}", tool, detail))
    }
}

/// Result type alias for notepad-mcp operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_id() {
        let err = Error::notepad_not_found(42);
        assert_eq!(err.to_string(), "Notepad with ID 42 not found");
    }

    #[test]
    fn test_unknown_tool_message() {
        let err = Error::UnknownTool("frobnicate".into());
        assert_eq!(err.to_string(), "Unknown tool: frobnicate");
    }

    #[test]
    fn test_invalid_arguments_message() {
        let err = Error::invalid_arguments("addNotepad", "missing field `name`");
        assert_eq!(
            err.to_string(),
            "Invalid arguments for addNotepad: missing field `name`"
        );
    }

    #[test]
    fn test_storage_message_passthrough() {
        let err = Error::Storage("disk I/O error".into());
        assert!(err.to_string().contains("disk I/O error"));
    }
}
