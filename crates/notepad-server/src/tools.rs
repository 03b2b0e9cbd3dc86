//! Tool registry for the notepad server
//!
//! Static catalog of the tools advertised on `tools/list`, their JSON input
//! schemas, and the typed argument payloads each tool accepts.

use notepad_core::{Error, Result};
use rmcp::model::Tool;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Map, Number, Value};
use std::fmt;

/// Tool names as constants
pub mod tool_names {
    pub const ADD_NOTEPAD: &str = "addNotepad";
    pub const DEL_NOTEPAD: &str = "delNotepad";
    pub const UPDATE_NOTEPAD: &str = "updateNotepad";
    pub const LIST_NOTEPADS: &str = "listNotepads";
    pub const USE_NOTEPAD: &str = "useNotepad";
}

/// Every tool the server can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotepadTool {
    Add,
    Delete,
    Update,
    List,
    Use,
}

impl NotepadTool {
    /// All tools in advertised order
    pub const ALL: [NotepadTool; 5] = [
        Self::Add,
        Self::Delete,
        Self::Update,
        Self::List,
        Self::Use,
    ];

    /// Get the wire name of this tool
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => tool_names::ADD_NOTEPAD,
            Self::Delete => tool_names::DEL_NOTEPAD,
            Self::Update => tool_names::UPDATE_NOTEPAD,
            Self::List => tool_names::LIST_NOTEPADS,
            Self::Use => tool_names::USE_NOTEPAD,
        }
    }

    /// Parse a tool name, `None` if it is not in the registry
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            tool_names::ADD_NOTEPAD => Some(Self::Add),
            tool_names::DEL_NOTEPAD => Some(Self::Delete),
            tool_names::UPDATE_NOTEPAD => Some(Self::Update),
            tool_names::LIST_NOTEPADS => Some(Self::List),
            tool_names::USE_NOTEPAD => Some(Self::Use),
            _ => None,
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Add => "Add a new notepad",
            Self::Delete => "Delete a notepad",
            Self::Update => "Update a notepad",
            Self::List => "List all notepads",
            Self::Use => "Use a specific notepad",
        }
    }

    /// JSON Schema describing the tool's arguments
    pub fn input_schema(&self) -> Value {
        match self {
            Self::Add => json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Name of the notepad" },
                    "content": { "type": "string", "description": "Content of the notepad" }
                },
                "required": ["name", "content"]
            }),
            Self::Delete => json!({
                "type": "object",
                "properties": {
                    "id": { "type": "number", "description": "ID of the notepad to delete" }
                },
                "required": ["id"]
            }),
            Self::Update => json!({
                "type": "object",
                "properties": {
                    "id": { "type": "number", "description": "ID of the notepad to update" },
                    "content": { "type": "string", "description": "New content for the notepad" }
                },
                "required": ["id", "content"]
            }),
            Self::List => json!({ "type": "object", "properties": {} }),
            Self::Use => json!({
                "type": "object",
                "properties": {
                    "id": { "type": "number", "description": "ID of the notepad to use" }
                },
                "required": ["id"]
            }),
        }
    }

    /// Build the MCP tool descriptor
    pub fn descriptor(&self) -> Tool {
        let schema = match self.input_schema() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Tool::new(self.as_str(), self.description(), schema)
    }
}

impl fmt::Display for NotepadTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Descriptors for every registered tool
pub fn registry() -> Vec<Tool> {
    NotepadTool::ALL.iter().map(NotepadTool::descriptor).collect()
}

/// Arguments for `addNotepad`
#[derive(Debug, Clone, Deserialize)]
pub struct AddNotepadArgs {
    pub name: String,
    pub content: String,
}

/// Arguments for `delNotepad` and `useNotepad`
#[derive(Debug, Clone, Deserialize)]
pub struct NotepadIdArgs {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
}

/// Arguments for `updateNotepad`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNotepadArgs {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    pub content: String,
}

/// Ids are advertised as JSON numbers, so `1.0` is accepted as `1`.
/// Fractional and out-of-range values are rejected.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    if let Some(id) = number.as_i64() {
        return Ok(id);
    }

    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(de::Error::custom(format!(
            "invalid id `{}`, expected an integer",
            number
        ))),
    }
}

/// Deserialize a tool's argument payload into its typed form
///
/// A `null` payload is treated as an empty object.
pub fn parse_args<T>(tool: NotepadTool, arguments: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    let arguments = if arguments.is_null() {
        Value::Object(Map::new())
    } else {
        arguments
    };

    serde_json::from_value(arguments).map_err(|e| Error::invalid_arguments(tool.as_str(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_round_trip() {
        for tool in NotepadTool::ALL {
            assert_eq!(NotepadTool::parse(tool.as_str()), Some(tool));
        }
        assert_eq!(NotepadTool::parse("removeNotepad"), None);
        // Names are case-sensitive
        assert_eq!(NotepadTool::parse("addnotepad"), None);
    }

    #[test]
    fn test_registry_order_and_names() {
        let names: Vec<String> = registry().iter().map(|t| t.name.to_string()).collect();
        assert_eq!(
            names,
            vec!["addNotepad", "delNotepad", "updateNotepad", "listNotepads", "useNotepad"]
        );
    }

    #[test]
    fn test_required_fields() {
        let required = |tool: NotepadTool| -> Vec<String> {
            tool.input_schema()["required"]
                .as_array()
                .map(|a| a.iter().filter_map(|v| v.as_str().map(String::from)).collect())
                .unwrap_or_default()
        };

        assert_eq!(required(NotepadTool::Add), vec!["name", "content"]);
        assert_eq!(required(NotepadTool::Delete), vec!["id"]);
        assert_eq!(required(NotepadTool::Update), vec!["id", "content"]);
        assert!(required(NotepadTool::List).is_empty());
        assert_eq!(required(NotepadTool::Use), vec!["id"]);
    }

    #[test]
    fn test_descriptor_carries_schema() {
        let tool = NotepadTool::Update.descriptor();
        assert_eq!(tool.description.as_deref(), Some("Update a notepad"));
        assert_eq!(tool.input_schema["type"], "object");
        assert_eq!(tool.input_schema["properties"]["id"]["type"], "number");
    }

    #[test]
    fn test_parse_args_success() {
        let args: UpdateNotepadArgs =
            parse_args(NotepadTool::Update, json!({ "id": 3, "content": "new" })).unwrap();
        assert_eq!(args.id, 3);
        assert_eq!(args.content, "new");
    }

    #[test]
    fn test_parse_args_missing_field() {
        let result: Result<AddNotepadArgs> =
            parse_args(NotepadTool::Add, json!({ "name": "only name" }));
        match result {
            Err(Error::InvalidArgument(msg)) => {
                assert!(msg.contains("addNotepad"));
                assert!(msg.contains("content"));
            }
            other => panic!("Expected invalid argument, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_args_wrong_type() {
        let result: Result<NotepadIdArgs> = parse_args(NotepadTool::Use, json!({ "id": "one" }));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));

        let result: Result<NotepadIdArgs> = parse_args(NotepadTool::Use, json!({ "id": 1.5 }));
        assert!(matches!(result, Err(Error::InvalidArgument(ref msg)) if msg.contains("1.5")));
    }

    #[test]
    fn test_parse_args_integral_float_id() {
        let args: NotepadIdArgs = parse_args(NotepadTool::Use, json!({ "id": 1.0 })).unwrap();
        assert_eq!(args.id, 1);

        let args: UpdateNotepadArgs =
            parse_args(NotepadTool::Update, json!({ "id": 42.0, "content": "x" })).unwrap();
        assert_eq!(args.id, 42);
    }

    #[test]
    fn test_parse_args_id_out_of_range() {
        let result: Result<NotepadIdArgs> =
            parse_args(NotepadTool::Delete, json!({ "id": u64::MAX }));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));

        let result: Result<NotepadIdArgs> = parse_args(NotepadTool::Delete, json!({ "id": 1e300 }));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_parse_args_null_payload() {
        let result: Result<NotepadIdArgs> = parse_args(NotepadTool::Delete, Value::Null);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}
