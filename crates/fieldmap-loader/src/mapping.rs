//! Mapping specification provider
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use crate::error::{LoaderError, LoaderResult};
use crate::parser::{kind_of, parse_content, read_file, Format};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Loads mapping documents (`root` plus `field_definitions`) from YAML or JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct MappingProvider;

impl MappingProvider {
    pub fn new() -> Self {
        Self
    }

    /// Load the mapping at `path`, choosing the format by extension.
    ///
    /// Only the file itself is checked here; the shape of its keys is checked
    /// when the core builds a `Mapping` from it.
    pub fn load(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;
        let content = read_file(path)?;
        let value = self.load_str(&content, format, path)?;
        debug!(
            path = %path.display(),
            ?format,
            definitions = value
                .get("field_definitions")
                .and_then(serde_json::Value::as_object)
                .map_or(0, |defs| defs.len()),
            "Loaded mapping"
        );
        Ok(value)
    }

    /// Parse mapping content with an explicit format
    pub fn load_str(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        if content.trim().is_empty() {
            return Err(LoaderError::Empty {
                path: path.to_path_buf(),
            });
        }

        match parse_content(content, format, path)? {
            Value::Null => Err(LoaderError::Empty {
                path: path.to_path_buf(),
            }),
            value @ Value::Object(_) => Ok(value),
            other => Err(LoaderError::NotAnObject {
                path: path.to_path_buf(),
                found: kind_of(&other).to_string(),
            }),
        }
    }
}
