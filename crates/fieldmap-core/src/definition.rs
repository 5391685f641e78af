//! Field definition model
//!
//! A [`FieldDefinition`] is the full mapping and validation contract of one
//! field: where its value comes from, what it is called in the output, how it
//! is checked, how enumerated values are translated, and where it is placed in
//! the nested structure. Definitions are immutable once built; use
//! [`FieldDefinitionBuilder`] or [`FieldDefinition::from_config`] to create them.
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the raw config entry that places a field in the nested structure
pub const XML_PATH_KEY: &str = "xml_path";

/// Validation config key selecting the type validator
pub const TYPE_KEY: &str = "type";

/// Immutable description of how one field is sourced, validated and placed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    source_field: String,
    target_field: String,
    required: bool,
    computed: bool,
    validation: Map<String, Value>,
    #[serde(rename = "static")]
    static_value: Option<Value>,
    values: Option<Map<String, Value>>,
    description: Option<String>,
    xml_paths: Vec<String>,
}

/// A type validator selection plus the constraints handed to it
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRule {
    pub type_name: String,
    pub constraints: Map<String, Value>,
}

impl FieldDefinition {
    /// Start building a definition reading `source_field` and writing `target_field`
    pub fn builder(
        source_field: impl Into<String>,
        target_field: impl Into<String>,
    ) -> FieldDefinitionBuilder {
        FieldDefinitionBuilder::new(source_field, target_field)
    }

    /// Build a definition from one raw `field_definitions` entry.
    ///
    /// Returns `Ok(None)` when the entry carries no `xml_path`: such fields are
    /// not part of the mapping pass at all.
    pub fn from_config(field_name: &str, raw: &Value) -> Result<Option<Self>> {
        let Some(object) = raw.as_object() else {
            return Err(Error::malformed(field_name, "definition must be a mapping"));
        };

        if object.get(XML_PATH_KEY).map_or(true, Value::is_null) {
            return Ok(None);
        }

        let raw: RawFieldDefinition = serde_json::from_value(raw.clone())
            .map_err(|e| Error::malformed(field_name, e.to_string()))?;

        raw.into_builder()
            .build()
            .map_err(|e| match e {
                Error::MalformedDefinition { message, .. } => Error::malformed(field_name, message),
                other => other,
            })
            .map(Some)
    }

    /// Key read from the input record
    pub fn source_field(&self) -> &str {
        &self.source_field
    }

    /// Key written to the mapped output
    pub fn target_field(&self) -> &str {
        &self.target_field
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_computed(&self) -> bool {
        self.computed
    }

    /// Raw validation config, including the `type` key when present
    pub fn validation(&self) -> &Map<String, Value> {
        &self.validation
    }

    /// The type validator to run and its constraints (`validation` minus `type`)
    pub fn validation_rule(&self) -> Option<ValidationRule> {
        let type_name = self.validation.get(TYPE_KEY)?.as_str()?.to_string();
        let constraints = self
            .validation
            .iter()
            .filter(|(key, _)| key.as_str() != TYPE_KEY)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Some(ValidationRule {
            type_name,
            constraints,
        })
    }

    /// String-valued validation option such as `format` or `output_format`
    pub fn validation_option(&self, key: &str) -> Option<&str> {
        self.validation.get(key).and_then(Value::as_str)
    }

    /// Static fallback, literal or symbolic. `null` counts as unset.
    pub fn static_value(&self) -> Option<&Value> {
        self.static_value.as_ref().filter(|v| !v.is_null())
    }

    pub fn has_static(&self) -> bool {
        self.static_value().is_some()
    }

    /// Enumeration translation table
    pub fn values(&self) -> Option<&Map<String, Value>> {
        self.values.as_ref()
    }

    /// Whether `value` is an accepted key of the translation table
    pub fn is_known_value(&self, value: &Value) -> bool {
        self.translate(value).is_some()
    }

    /// Translated output for `value`, if the table has an entry for it
    pub fn translate(&self, value: &Value) -> Option<&Value> {
        let key = translation_key(value)?;
        self.values.as_ref()?.get(&key)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Slash-delimited placement paths, already trimmed of outer slashes
    pub fn xml_paths(&self) -> &[String] {
        &self.xml_paths
    }
}

/// Key under which a scalar value is looked up in a `values` table.
///
/// Table keys are always strings after loading, so numbers and booleans are
/// matched through their textual form. Arrays and objects never match.
pub fn translation_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Builder for [`FieldDefinition`] with explicit defaults
#[derive(Debug, Clone)]
pub struct FieldDefinitionBuilder {
    source_field: String,
    target_field: String,
    required: bool,
    computed: bool,
    validation: Map<String, Value>,
    static_value: Option<Value>,
    values: Option<Map<String, Value>>,
    description: Option<String>,
    xml_paths: Vec<String>,
}

impl FieldDefinitionBuilder {
    /// Create a builder with `required=false`, `computed=false` and no validation
    pub fn new(source_field: impl Into<String>, target_field: impl Into<String>) -> Self {
        Self {
            source_field: source_field.into(),
            target_field: target_field.into(),
            required: false,
            computed: false,
            validation: Map::new(),
            static_value: None,
            values: None,
            description: None,
            xml_paths: Vec::new(),
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn computed(mut self, computed: bool) -> Self {
        self.computed = computed;
        self
    }

    /// Replace the whole validation config
    pub fn validation(mut self, validation: Map<String, Value>) -> Self {
        self.validation = validation;
        self
    }

    /// Select the type validator
    pub fn validation_type(mut self, type_name: impl Into<String>) -> Self {
        self.validation
            .insert(TYPE_KEY.to_string(), Value::String(type_name.into()));
        self
    }

    /// Add one validation option (`min`, `format`, `allowed_values`, ...)
    pub fn constraint(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.validation.insert(key.into(), value.into());
        self
    }

    pub fn static_value(mut self, value: impl Into<Value>) -> Self {
        self.static_value = Some(value.into());
        self
    }

    /// Replace the translation table
    pub fn values(mut self, values: Map<String, Value>) -> Self {
        self.values = Some(values);
        self
    }

    /// Add one translation table entry
    pub fn value(mut self, key: impl Into<String>, translated: impl Into<Value>) -> Self {
        self.values
            .get_or_insert_with(Map::new)
            .insert(key.into(), translated.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a placement path
    pub fn xml_path(mut self, path: impl Into<String>) -> Self {
        self.xml_paths.push(path.into());
        self
    }

    /// Add several placement paths
    pub fn xml_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.xml_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Check invariants and build the definition
    pub fn build(self) -> Result<FieldDefinition> {
        if self.source_field.trim().is_empty() {
            return Err(Error::malformed(&self.target_field, "source field must not be empty"));
        }
        if self.target_field.trim().is_empty() {
            return Err(Error::malformed(&self.source_field, "target field must not be empty"));
        }
        if self.xml_paths.is_empty() {
            return Err(Error::malformed(
                &self.source_field,
                "at least one xml path is required",
            ));
        }
        if let Some(type_value) = self.validation.get(TYPE_KEY) {
            if !type_value.is_string() {
                return Err(Error::malformed(
                    &self.source_field,
                    format!("validation type must be a string, got {}", type_value),
                ));
            }
        }

        let xml_paths = self
            .xml_paths
            .iter()
            .map(|path| path.trim_matches('/').to_string())
            .collect();

        Ok(FieldDefinition {
            source_field: self.source_field,
            target_field: self.target_field,
            required: self.required,
            computed: self.computed,
            validation: self.validation,
            static_value: self.static_value,
            values: self.values,
            description: self.description,
            xml_paths,
        })
    }
}

/// Serde shape of one `field_definitions` entry in a mapping file
#[derive(Debug, Clone, Deserialize)]
pub struct RawFieldDefinition {
    pub field: String,
    pub maps_to: String,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub validation: Option<Map<String, Value>>,
    #[serde(default, rename = "static")]
    pub static_value: Option<Value>,
    #[serde(default)]
    pub computed: Option<bool>,
    #[serde(default)]
    pub xml_path: Option<Vec<String>>,
    #[serde(default)]
    pub values: Option<Map<String, Value>>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RawFieldDefinition {
    /// Convert into a builder, applying the documented defaults
    pub fn into_builder(self) -> FieldDefinitionBuilder {
        let mut builder = FieldDefinitionBuilder::new(self.field, self.maps_to)
            .required(self.required.unwrap_or(false))
            .computed(self.computed.unwrap_or(false))
            .validation(self.validation.unwrap_or_default())
            .xml_paths(self.xml_path.unwrap_or_default());

        if let Some(value) = self.static_value {
            builder = builder.static_value(value);
        }
        if let Some(values) = self.values {
            builder = builder.values(values);
        }
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        builder
    }
}

impl TryFrom<RawFieldDefinition> for FieldDefinition {
    type Error = Error;

    fn try_from(raw: RawFieldDefinition) -> Result<Self> {
        raw.into_builder().build()
    }
}
