//! Mapping configuration and per-run result types
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use crate::definition::FieldDefinition;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// A flat record: field name to value, in insertion order
pub type Record = Map<String, Value>;

/// Top-level key holding the XML root element name
pub const ROOT_KEY: &str = "root";

/// Top-level key holding the raw field definitions
pub const FIELD_DEFINITIONS_KEY: &str = "field_definitions";

/// Value of `key` in `data`, treating `null` the same as a missing key
pub fn lookup<'a>(data: &'a Record, key: &str) -> Option<&'a Value> {
    data.get(key).filter(|value| !value.is_null())
}

/// Root mapping configuration: root element plus raw field definitions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mapping {
    root: String,
    field_definitions: Map<String, Value>,
}

impl Mapping {
    pub fn new(root: impl Into<String>, field_definitions: Map<String, Value>) -> Self {
        Self {
            root: root.into(),
            field_definitions,
        }
    }

    /// Build from a loaded mapping document.
    ///
    /// Fails with a configuration error when `field_definitions` or `root` is
    /// missing or has the wrong shape.
    pub fn from_value(config: &Value) -> Result<Self> {
        let object = config
            .as_object()
            .ok_or_else(|| Error::configuration("mapping configuration must be an object"))?;

        let field_definitions = object
            .get(FIELD_DEFINITIONS_KEY)
            .ok_or_else(|| {
                Error::configuration(format!("missing '{}' key", FIELD_DEFINITIONS_KEY))
            })?
            .as_object()
            .ok_or_else(|| {
                Error::configuration(format!("'{}' must be a map", FIELD_DEFINITIONS_KEY))
            })?
            .clone();

        let root = object
            .get(ROOT_KEY)
            .ok_or_else(|| Error::configuration(format!("missing '{}' key", ROOT_KEY)))?
            .as_str()
            .filter(|root| !root.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration(format!("'{}' must be a non-empty string", ROOT_KEY))
            })?
            .to_string();

        Ok(Self::new(root, field_definitions))
    }

    /// XML root element name
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Raw definitions keyed by field name, in file order
    pub fn field_definitions(&self) -> &Map<String, Value> {
        &self.field_definitions
    }
}

impl TryFrom<&Value> for Mapping {
    type Error = Error;

    fn try_from(config: &Value) -> Result<Self> {
        Self::from_value(config)
    }
}

/// Output of the mapping stage
#[derive(Debug, Clone, Default)]
pub struct MappedData {
    /// Direct values keyed by target field
    pub mapped: Record,
    /// Definitions deferred to the computed field resolver
    pub computed: Vec<FieldDefinition>,
}

impl MappedData {
    /// Merge direct and computed values; computed keys win
    pub fn merge(mut self, computed: Record) -> Record {
        self.mapped.extend(computed);
        self.mapped
    }
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingOutcome {
    /// Root element for the renderer
    pub root: String,
    /// Merged flat values keyed by target field
    pub values: Record,
    /// Nested tree built from the placement paths
    pub structure: Record,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value() {
        let config = json!({
            "root": "Request",
            "field_definitions": {
                "name": {"field": "name", "maps_to": "dummy_name", "xml_path": ["Dummy/Name"]}
            }
        });
        let mapping = Mapping::from_value(&config).unwrap();
        assert_eq!(mapping.root(), "Request");
        assert_eq!(mapping.field_definitions().len(), 1);
    }

    #[test]
    fn test_missing_field_definitions_fails() {
        let err = Mapping::from_value(&json!({"root": "Request"})).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("field_definitions"));
    }

    #[test]
    fn test_missing_root_fails() {
        let err = Mapping::from_value(&json!({"field_definitions": {}})).unwrap_err();
        assert!(err.to_string().contains("root"));
    }

    #[test]
    fn test_lookup_treats_null_as_absent() {
        let data = json!({"a": null, "b": 0}).as_object().unwrap().clone();
        assert_eq!(lookup(&data, "a"), None);
        assert_eq!(lookup(&data, "b"), Some(&json!(0)));
        assert_eq!(lookup(&data, "c"), None);
    }

    #[test]
    fn test_merge_prefers_computed() {
        let mut mapped = Record::new();
        mapped.insert("flag".into(), json!("raw"));
        mapped.insert("name".into(), json!("Ali"));
        let data = MappedData {
            mapped,
            computed: Vec::new(),
        };

        let mut computed = Record::new();
        computed.insert("flag".into(), json!(1));
        let merged = data.merge(computed);
        assert_eq!(merged, *json!({"flag": 1, "name": "Ali"}).as_object().unwrap());
    }
}
