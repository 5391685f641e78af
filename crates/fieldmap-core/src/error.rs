//! Error types for the Fieldmap core library
//!
//! This module defines the error taxonomy of the mapping pipeline, using
//! thiserror for ergonomic error definitions and anyhow for flexible error contexts.
//!
//! Only [`Error::FieldValidation`] describes a problem with the caller's input;
//! every other variant is a configuration or programming fault.
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Main error type for Fieldmap operations
#[derive(Error, Debug)]
pub enum Error {
    /// Mapping configuration is unusable (missing keys, wrong shapes)
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// A raw field definition could not be turned into a `FieldDefinition`
    #[error("Malformed field definition '{field}': {message}")]
    MalformedDefinition { field: String, message: String },

    /// A validator type was requested that is not registered
    #[error("No validator found for type: {type_name}")]
    UnknownValidator { type_name: String },

    /// A computed field has no registered computation rule
    #[error("Method ({rule}) not implemented for computed field '{field}'")]
    UnimplementedComputation { rule: String, field: String },

    /// Input data failed validation; carries every failing field
    #[error("Field validation failed: {0}")]
    FieldValidation(FieldValidationErrors),

    /// JSON conversion errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error without an underlying cause
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a malformed definition error
    pub fn malformed(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedDefinition {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether this error reports bad input data rather than a setup fault
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::FieldValidation(_))
    }

    /// Access the accumulated field errors, if this is a validation failure
    pub fn field_errors(&self) -> Option<&FieldValidationErrors> {
        match self {
            Self::FieldValidation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Every validation message produced in one pass, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldValidationErrors {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record messages for a field, appending to any already recorded
    pub fn record<I, S>(&mut self, field: impl Into<String>, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.errors
            .entry(field.into())
            .or_default()
            .extend(messages.into_iter().map(Into::into));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields that failed
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Messages recorded for one field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    /// Iterate `(field, messages)` pairs in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Consume the collector, failing if anything was recorded
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::FieldValidation(self))
        }
    }
}

impl fmt::Display for FieldValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownValidator {
            type_name: "uuid".to_string(),
        };
        assert_eq!(err.to_string(), "No validator found for type: uuid");
    }

    #[test]
    fn test_unimplemented_computation_names_rule() {
        let err = Error::UnimplementedComputation {
            rule: "computePolicyHolder".to_string(),
            field: "policyHolder".to_string(),
        };
        assert!(err.to_string().contains("computePolicyHolder"));
        assert!(!err.is_validation_error());
    }

    #[test]
    fn test_field_errors_accumulate() {
        let mut errors = FieldValidationErrors::new();
        errors.record("age", ["Must be a number"]);
        errors.record("name", vec!["Field is required".to_string()]);
        errors.record("age", ["Value must be >= 18"]);

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get("age").unwrap(),
            &["Must be a number".to_string(), "Value must be >= 18".to_string()]
        );

        let err = errors.into_result().unwrap_err();
        assert!(err.is_validation_error());
        assert_eq!(err.field_errors().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_collector_is_ok() {
        assert!(FieldValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_field_errors_serialize_as_map() {
        let mut errors = FieldValidationErrors::new();
        errors.record("status", ["Invalid mapping value for [status]"]);
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": ["Invalid mapping value for [status]"]})
        );
    }
}
