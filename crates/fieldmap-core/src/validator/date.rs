//! Date validator with strict format matching
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use super::types::{ValidationResult, Validator};
use crate::date_format::{self, DEFAULT_INPUT_FORMAT};
use serde_json::{Map, Value};

/// Constraint key holding the expected date format
pub const FORMAT: &str = "format";

/// Accepts strings that parse with `format` and reformat to the same text.
///
/// The round trip rejects dates a lenient parser would roll over
/// (`2025-02-30`) as well as values with missing zero padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateValidator;

impl DateValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for DateValidator {
    fn validate(&self, value: &Value, constraints: &Map<String, Value>) -> ValidationResult {
        let format = constraints
            .get(FORMAT)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_INPUT_FORMAT);

        match value.as_str() {
            Some(text) if date_format::round_trips(text, format) => ValidationResult::valid(),
            _ => ValidationResult::invalid(["Invalid date format"]),
        }
    }
}
