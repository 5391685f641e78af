//! Input record parser
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use crate::error::{LoaderError, LoaderResult};
use crate::parser::{kind_of, parse_json, read_file};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Reads one flat input record from a JSON file
#[derive(Debug, Clone, Copy, Default)]
pub struct InputParser;

impl InputParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse the record at `path`.
    ///
    /// Fails with `NotFound`, `Io`, `JsonParse`, `Empty` (blank file, `null`,
    /// `{}` or `[]`) or `NotAnObject`.
    pub fn parse(&self, path: &Path) -> LoaderResult<Map<String, Value>> {
        let content = read_file(path)?;
        let record = self.parse_str(&content, path)?;
        debug!(path = %path.display(), fields = record.len(), "Parsed input record");
        Ok(record)
    }

    /// Parse record content; `path` is only used in errors
    pub fn parse_str(&self, content: &str, path: &Path) -> LoaderResult<Map<String, Value>> {
        let empty = || LoaderError::Empty {
            path: path.to_path_buf(),
        };

        if content.trim().is_empty() {
            return Err(empty());
        }

        match parse_json(content, path)? {
            Value::Null => Err(empty()),
            Value::Array(items) if items.is_empty() => Err(empty()),
            Value::Object(record) if record.is_empty() => Err(empty()),
            Value::Object(record) => Ok(record),
            other => Err(LoaderError::NotAnObject {
                path: path.to_path_buf(),
                found: kind_of(&other).to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(content: &str) -> LoaderResult<Map<String, Value>> {
        InputParser.parse_str(content, Path::new("input.json"))
    }

    #[test]
    fn test_parse_record() {
        let record = parse(r#"{"name": "Ali", "age": 30}"#).unwrap();
        assert_eq!(record.get("name"), Some(&json!("Ali")));
        assert_eq!(record.get("age"), Some(&json!(30)));
    }

    #[test]
    fn test_preserves_key_order() {
        let record = parse(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_empty_documents() {
        for content in ["", "   \n", "null", "{}", "[]"] {
            assert!(
                matches!(parse(content), Err(LoaderError::Empty { .. })),
                "{content:?} should be empty"
            );
        }
    }

    #[test]
    fn test_non_object_documents() {
        for content in ["[1, 2]", "\"text\"", "42", "true"] {
            assert!(
                matches!(parse(content), Err(LoaderError::NotAnObject { .. })),
                "{content:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse("{name: Ali}"),
            Err(LoaderError::JsonParse { .. })
        ));
    }
}
