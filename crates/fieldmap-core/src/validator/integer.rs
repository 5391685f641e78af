//! Numeric validator with optional range constraints
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use super::types::{ValidationResult, Validator};
use serde_json::{Map, Value};
use tracing::warn;

/// Inclusive lower bound constraint key
pub const MIN: &str = "min";

/// Inclusive upper bound constraint key
pub const MAX: &str = "max";

/// Accepts numbers and numeric strings, optionally bounded by `min`/`max`.
///
/// Checks run in order (numeric, min, max) and the first failure is the only
/// message returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerValidator;

impl IntegerValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for IntegerValidator {
    fn validate(&self, value: &Value, constraints: &Map<String, Value>) -> ValidationResult {
        let Some(number) = numeric(value) else {
            return ValidationResult::invalid(["Must be a number"]);
        };

        if let Some(min) = bound(constraints, MIN) {
            if number < min.0 {
                return ValidationResult::invalid([format!("Value must be >= {}", min.1)]);
            }
        }

        if let Some(max) = bound(constraints, MAX) {
            if number > max.0 {
                return ValidationResult::invalid([format!("Value must be <= {}", max.1)]);
            }
        }

        ValidationResult::valid()
    }
}

/// Numeric reading of a JSON value: numbers, or strings that spell a number
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric(s),
        _ => None,
    }
}

/// Decimal or exponent notation with optional sign and surrounding whitespace.
/// Words such as `inf` or `NaN` and hex literals are rejected.
fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty()
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        || !trimmed.chars().any(|c| c.is_ascii_digit())
    {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Bound value and its display form, e.g. `(1.0, "1")`
fn bound(constraints: &Map<String, Value>, key: &str) -> Option<(f64, String)> {
    let raw = constraints.get(key).filter(|v| !v.is_null())?;
    match numeric(raw) {
        Some(number) => {
            let display = match raw {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            };
            Some((number, display))
        }
        None => {
            warn!(constraint = key, value = %raw, "Ignoring non-numeric range constraint");
            None
        }
    }
}
