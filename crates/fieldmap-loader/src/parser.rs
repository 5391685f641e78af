//! Format detection and YAML/JSON parsing into the shared value model
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use crate::error::{LoaderError, LoaderResult};
use serde_json::{Map, Number, Value};
use std::path::Path;

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(LoaderError::unsupported_format(path)),
        }
    }

    /// Get the primary file extension for this format
    pub fn primary_extension(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }
}

/// Reads a file, mapping a missing path and read failures to distinct errors
pub fn read_file(path: &Path) -> LoaderResult<String> {
    if !path.exists() {
        return Err(LoaderError::not_found(path));
    }
    std::fs::read_to_string(path).map_err(|e| LoaderError::io_error(path, e))
}

/// Parse content with an explicit format
pub fn parse_content(content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
    match format {
        Format::Yaml => parse_yaml(content, path),
        Format::Json => parse_json(content, path),
    }
}

/// Parse JSON content
pub fn parse_json(content: &str, path: &Path) -> LoaderResult<Value> {
    serde_json::from_str(content).map_err(|e| LoaderError::json_parse_error(path, e))
}

/// Parse YAML content and convert it to JSON values.
///
/// Mapping keys that are not strings (`1:`, `true:`) become their text form
/// so enumeration tables keyed by numbers keep working.
pub fn parse_yaml(content: &str, path: &Path) -> LoaderResult<Value> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| LoaderError::yaml_parse_error(path, e))?;
    yaml_to_json(yaml).map_err(|reason| LoaderError::UnsupportedYaml {
        path: path.to_path_buf(),
        reason,
    })
}

fn yaml_to_json(yaml: serde_yaml::Value) -> Result<Value, String> {
    Ok(match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number(&n)?,
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                object.insert(yaml_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(object)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Result<Value, String> {
    if let Some(i) = n.as_i64() {
        Ok(Value::from(i))
    } else if let Some(u) = n.as_u64() {
        Ok(Value::from(u))
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| format!("number {} has no JSON representation", n))
    }
}

fn yaml_key(key: serde_yaml::Value) -> Result<String, String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok(String::new()),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        other => Err(format!("mapping key {:?} is not a scalar", other)),
    }
}

/// Short name of a JSON value's kind, for error messages
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
