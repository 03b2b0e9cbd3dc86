//! Main MCP server implementation

use crate::errors::to_error_data;
use crate::tools::{self, AddNotepadArgs, NotepadIdArgs, NotepadTool, UpdateNotepadArgs};
use notepad_core::{Error, Result};
use notepad_storage::Database;
use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolResult, Content, Implementation, ListToolsResult, ServerCapabilities, ServerInfo, Tool,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// MCP server for the notepad store
#[derive(Clone)]
pub struct NotepadServer {
    pub db: Arc<Database>,
}

impl NotepadServer {
    /// Create a server backed by the given store
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create a server with in-memory storage (for testing)
    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(Arc::new(Database::in_memory()?)))
    }

    /// Get server info for MCP
    pub fn server_info() -> Implementation {
        Implementation {
            name: "notepad-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            ..Implementation::from_build_env()
        }
    }

    /// Get server capabilities
    pub fn capabilities() -> ServerCapabilities {
        ServerCapabilities::builder().enable_tools().build()
    }

    /// List available tools
    pub fn list_tools(&self) -> Vec<Tool> {
        tools::registry()
    }

    /// Call a tool by name
    pub fn call_tool(&self, name: &str, arguments: Value) -> Result<String> {
        let tool = NotepadTool::parse(name).ok_or_else(|| Error::UnknownTool(name.to_string()))?;
        debug!(tool = %tool, "Dispatching tool call");

        match tool {
            NotepadTool::Add => {
                let args: AddNotepadArgs = tools::parse_args(tool, arguments)?;
                self.add_notepad(&args.name, &args.content)
            }
            NotepadTool::Delete => {
                let args: NotepadIdArgs = tools::parse_args(tool, arguments)?;
                self.del_notepad(args.id)
            }
            NotepadTool::Update => {
                let args: UpdateNotepadArgs = tools::parse_args(tool, arguments)?;
                self.update_notepad(args.id, &args.content)
            }
            NotepadTool::List => self.list_notepads(),
            NotepadTool::Use => {
                let args: NotepadIdArgs = tools::parse_args(tool, arguments)?;
                self.use_notepad(args.id)
            }
        }
    }

    // Tool implementations

    fn add_notepad(&self, name: &str, content: &str) -> Result<String> {
        let id = self.db.insert_notepad(name, content)?;
        Ok(format!("Notepad added with ID {}", id))
    }

    fn del_notepad(&self, id: i64) -> Result<String> {
        if !self.db.delete_notepad(id)? {
            return Err(Error::notepad_not_found(id));
        }
        Ok(format!("Notepad with ID {} deleted", id))
    }

    fn update_notepad(&self, id: i64, content: &str) -> Result<String> {
        if !self.db.update_notepad_content(id, content)? {
            return Err(Error::notepad_not_found(id));
        }
        Ok(format!("Notepad with ID {} updated", id))
    }

    fn list_notepads(&self) -> Result<String> {
        let notepads = self.db.list_notepads()?;
        Ok(serde_json::to_string_pretty(&notepads)?)
    }

    fn use_notepad(&self, id: i64) -> Result<String> {
        let notepad = self
            .db
            .get_notepad(id)?
            .ok_or_else(|| Error::notepad_not_found(id))?;
        notepad.to_pretty_json()
    }
}

/// MCP ServerHandler implementation
impl ServerHandler for NotepadServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: Self::capabilities(),
            server_info: Self::server_info(),
            instructions: Some(
                "Notepad server: a persistent store of named notes. Use listNotepads to \
                 discover ids, useNotepad to read one, and addNotepad, updateNotepad or \
                 delNotepad to change them."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> std::result::Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult {
            tools: self.list_tools(),
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: rmcp::model::CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> std::result::Result<CallToolResult, rmcp::model::ErrorData> {
        let name = request.name.as_ref();
        let arguments = request
            .arguments
            .map(Value::Object)
            .unwrap_or(json!({}));

        match self.call_tool(name, arguments) {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => {
                warn!(tool = %name, error = %e, "Tool call failed");
                Err(to_error_data(&e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_server() -> NotepadServer {
        NotepadServer::in_memory().expect("Failed to create test server")
    }

    #[test]
    fn test_add_returns_id_text() {
        let server = create_test_server();
        let output = server
            .call_tool("addNotepad", json!({ "name": "a", "content": "b" }))
            .unwrap();
        assert_eq!(output, "Notepad added with ID 1");
    }

    #[test]
    fn test_list_empty_is_empty_array() {
        let server = create_test_server();
        let output = server.call_tool("listNotepads", json!({})).unwrap();
        assert_eq!(output, "[]");
    }

    #[test]
    fn test_list_ignores_missing_arguments() {
        let server = create_test_server();
        assert!(server.call_tool("listNotepads", Value::Null).is_ok());
    }

    #[test]
    fn test_unknown_tool_is_rejected_before_storage() {
        let server = create_test_server();
        let err = server.call_tool("dropTables", json!({})).unwrap_err();
        assert!(matches!(err, Error::UnknownTool(ref n) if n == "dropTables"));
    }

    #[test]
    fn test_invalid_arguments_do_not_touch_storage() {
        let server = create_test_server();
        let err = server
            .call_tool("addNotepad", json!({ "name": 1, "content": "x" }))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(server.db.list_notepads().unwrap().is_empty());
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let server = create_test_server();
        let err = server
            .call_tool("updateNotepad", json!({ "id": 9, "content": "x" }))
            .unwrap_err();
        assert_eq!(err.to_string(), "Notepad with ID 9 not found");
    }

    #[test]
    fn test_server_info() {
        let info = NotepadServer::server_info();
        assert_eq!(info.name, "notepad-server");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }
}
