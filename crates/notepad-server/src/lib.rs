//! Notepad Server - MCP server implementation
//!
//! This crate implements the MCP server exposing the notepad tools.

pub mod errors;
pub mod runner;
pub mod server;
pub mod tools;

pub use runner::{RunnerConfig, ServerRunner};
pub use server::NotepadServer;
pub use tools::NotepadTool;
