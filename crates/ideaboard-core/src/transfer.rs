//! Whole-board export and import as a JSON array of ideas.
//!
//! Import only parses and normalizes; replacing the store (after the user
//! confirms) is up to the caller, so a rejected file leaves everything as
//! it was.

use serde_json::Value;
use tracing::debug;

use crate::error::{ImportError, Result};
use crate::model::Idea;
use crate::model::normalize::normalize_all;

/// Default file name offered for exports.
pub const EXPORT_FILE_NAME: &str = "idea_board_data.json";

/// Pretty-printed JSON array (two-space indent).
pub fn export_json(ideas: &[Idea]) -> Result<String> {
    Ok(serde_json::to_string_pretty(ideas)?)
}

/// Parse an import document. Records are normalized the same way as the
/// stored blob, so missing ids and comments are filled in.
pub fn parse_import(text: &str) -> Result<Vec<Idea>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::InvalidJson)?;
    let Value::Array(records) = value else {
        return Err(ImportError::NotAnArray {
            found: json_kind(&value),
        });
    };
    let ideas = normalize_all(&records);
    debug!(records = records.len(), ideas = ideas.len(), "parsed import");
    Ok(ideas)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
