//! Shared data types

use serde::{Deserialize, Serialize};

/// A single persisted notepad row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notepad {
    pub id: i64,
    pub name: String,
    pub content: String,
}

impl Notepad {
    /// Pretty-printed JSON with two-space indentation
    pub fn to_pretty_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_json_field_order() {
        let notepad = Notepad {
            id: 1,
            name: "shopping".into(),
            content: "milk,eggs".into(),
        };
        let json = notepad.to_pretty_json().unwrap();
        assert_eq!(
            json,
            "{\n  \"id\": 1,\n  \"name\": \"shopping\",\n  \"content\": \"milk,eggs\"\n}"
        );
    }
}
