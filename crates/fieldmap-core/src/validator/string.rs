//! String validator with optional allowed-value list
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use super::types::{ValidationResult, Validator};
use serde_json::{Map, Value};

/// Constraint key listing the accepted strings
pub const ALLOWED_VALUES: &str = "allowed_values";

/// Accepts string values, optionally restricted to `allowed_values`
#[derive(Debug, Clone, Copy, Default)]
pub struct StringValidator;

impl StringValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for StringValidator {
    fn validate(&self, value: &Value, constraints: &Map<String, Value>) -> ValidationResult {
        let Some(text) = value.as_str() else {
            return ValidationResult::invalid(["Must be a string"]);
        };

        if let Some(allowed) = constraints.get(ALLOWED_VALUES).and_then(Value::as_array) {
            if !allowed.iter().any(|candidate| matches_allowed(candidate, text)) {
                return ValidationResult::invalid(["Not allowed value"]);
            }
        }

        ValidationResult::valid()
    }
}

/// Allowed lists may contain numbers in YAML; compare them by their text form
fn matches_allowed(candidate: &Value, text: &str) -> bool {
    match candidate {
        Value::String(s) => s == text,
        Value::Number(n) => n.to_string() == text,
        _ => false,
    }
}
