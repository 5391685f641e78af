//! Field validator: builds definitions and checks input against them
//!
//! Every field is checked before anything fails, so a caller gets the full
//! list of problems from one run.
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use crate::definition::FieldDefinition;
use crate::error::FieldValidationErrors;
use crate::mapping::{lookup, Record};
use crate::static_value::StaticResolver;
use crate::validator::ValidatorFactory;
use crate::Result;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Outcome of checking one field
enum FieldCheck {
    Valid,
    Invalid(Vec<String>),
}

/// Validates input records against raw field definitions
#[derive(Debug)]
pub struct FieldValidator<'a> {
    factory: &'a ValidatorFactory,
    statics: &'a StaticResolver,
}

impl<'a> FieldValidator<'a> {
    pub fn new(factory: &'a ValidatorFactory, statics: &'a StaticResolver) -> Self {
        Self { factory, statics }
    }

    /// Validate `data` against every placed definition in `raw_definitions`.
    ///
    /// Returns the definitions that passed, in configuration order. Entries
    /// without an `xml_path` are skipped. If any field fails, the error
    /// carries the messages of every failing field.
    ///
    /// Configuration faults (malformed definition, unknown validator type)
    /// abort immediately.
    pub fn validate(
        &self,
        data: &Record,
        raw_definitions: &Map<String, Value>,
    ) -> Result<Vec<FieldDefinition>> {
        let mut errors = FieldValidationErrors::new();
        let mut accepted = Vec::with_capacity(raw_definitions.len());

        for (field_name, raw) in raw_definitions {
            let Some(definition) = FieldDefinition::from_config(field_name, raw)? else {
                trace!(field = %field_name, "No xml_path, skipping");
                continue;
            };

            match self.check_field(field_name, data, &definition)? {
                FieldCheck::Valid => accepted.push(definition),
                FieldCheck::Invalid(messages) => {
                    debug!(field = %field_name, ?messages, "Field failed validation");
                    errors.record(field_name.as_str(), messages);
                }
            }
        }

        errors.into_result()?;
        debug!(accepted = accepted.len(), "Validation passed");
        Ok(accepted)
    }

    fn check_field(
        &self,
        field_name: &str,
        data: &Record,
        definition: &FieldDefinition,
    ) -> Result<FieldCheck> {
        let present = lookup(data, field_name);

        if present.is_none() && definition.is_required() {
            return Ok(FieldCheck::Invalid(vec!["Field is required".to_string()]));
        }

        if present.is_none() && !definition.has_static() && !definition.is_computed() {
            return Ok(FieldCheck::Valid);
        }

        let value = if definition.is_computed() {
            // An absent computed source is checked as null and skips the type check
            match lookup(data, definition.source_field()) {
                Some(value) => Some(value.clone()),
                None => return Ok(FieldCheck::Valid),
            }
        } else {
            present
                .cloned()
                .or_else(|| self.statics.resolve_for_input(definition))
        };
        let value = value.unwrap_or(Value::Null);

        if let Some(rule) = definition.validation_rule() {
            let validator = self.factory.get(&rule.type_name)?;
            let result = validator.validate(&value, &rule.constraints);
            if !result.is_valid() {
                return Ok(FieldCheck::Invalid(result.into_errors()));
            }
        }

        if definition.values().is_some()
            && !definition.is_computed()
            && !definition.is_known_value(&value)
        {
            return Ok(FieldCheck::Invalid(vec![format!(
                "Invalid mapping value for [{}]",
                field_name
            )]));
        }

        Ok(FieldCheck::Valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::static_value::FixedClock;
    use crate::Error;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::sync::Arc;

    fn statics() -> StaticResolver {
        let at = NaiveDate::from_ymd_opt(2025, 2, 17)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        StaticResolver::new(Arc::new(FixedClock(at)))
    }

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn run(data: Value, definitions: Value) -> Result<Vec<FieldDefinition>> {
        let factory = ValidatorFactory::new();
        let statics = statics();
        FieldValidator::new(&factory, &statics).validate(&object(data), &object(definitions))
    }

    fn messages(err: &Error, field: &str) -> Vec<String> {
        err.field_errors()
            .and_then(|errors| errors.get(field))
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }

    #[test]
    fn test_valid_field_passes() {
        let defs = run(
            json!({"name": "Ali"}),
            json!({"name": {"field": "name", "maps_to": "dummy_name", "xml_path": ["Dummy/Name"],
                            "validation": {"type": "string"}}}),
        )
        .unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].target_field(), "dummy_name");
    }

    #[test]
    fn test_definitions_without_xml_path_are_skipped() {
        let defs = run(
            json!({}),
            json!({"internal": {"field": "internal", "maps_to": "x", "required": true}}),
        )
        .unwrap();
        assert!(defs.is_empty());
    }

    #[test]
    fn test_required_missing() {
        let err = run(
            json!({}),
            json!({"age": {"field": "age", "maps_to": "age", "required": true, "xml_path": ["P"],
                           "validation": {"type": "integer", "min": 18}}}),
        )
        .unwrap_err();
        assert_eq!(messages(&err, "age"), vec!["Field is required"]);
    }

    #[test]
    fn test_null_counts_as_missing() {
        let err = run(
            json!({"age": null}),
            json!({"age": {"field": "age", "maps_to": "age", "required": true, "xml_path": ["P"]}}),
        )
        .unwrap_err();
        assert_eq!(messages(&err, "age"), vec!["Field is required"]);
    }

    #[test]
    fn test_optional_absent_field_is_kept() {
        let defs = run(
            json!({}),
            json!({"nick": {"field": "nick", "maps_to": "nick", "xml_path": ["P"],
                            "validation": {"type": "string"}, "values": {"A": "a"}}}),
        )
        .unwrap();
        assert_eq!(defs.len(), 1);
    }

    #[test]
    fn test_errors_accumulate_across_fields() {
        let err = run(
            json!({"age": "old", "status": "X"}),
            json!({
                "name": {"field": "name", "maps_to": "n", "required": true, "xml_path": ["P"]},
                "age": {"field": "age", "maps_to": "a", "xml_path": ["P"], "validation": {"type": "integer"}},
                "status": {"field": "status", "maps_to": "s", "xml_path": ["P"],
                           "values": {"A": "Active", "I": "Inactive"}}
            }),
        )
        .unwrap_err();

        assert_eq!(err.field_errors().unwrap().len(), 3);
        assert_eq!(messages(&err, "name"), vec!["Field is required"]);
        assert_eq!(messages(&err, "age"), vec!["Must be a number"]);
        assert_eq!(messages(&err, "status"), vec!["Invalid mapping value for [status]"]);
    }

    #[test]
    fn test_type_failure_skips_enum_check() {
        let err = run(
            json!({"status": 5}),
            json!({"status": {"field": "status", "maps_to": "s", "xml_path": ["P"],
                              "validation": {"type": "string"}, "values": {"A": "Active"}}}),
        )
        .unwrap_err();
        assert_eq!(messages(&err, "status"), vec!["Must be a string"]);
    }

    #[test]
    fn test_static_value_is_validated() {
        let err = run(
            json!({}),
            json!({"kind": {"field": "kind", "maps_to": "k", "xml_path": ["P"], "static": "Z",
                            "values": {"A": "Active"}}}),
        )
        .unwrap_err();
        assert_eq!(messages(&err, "kind"), vec!["Invalid mapping value for [kind]"]);
    }

    #[test]
    fn test_now_token_validates_against_input_format() {
        let defs = run(
            json!({}),
            json!({"issued": {"field": "issued", "maps_to": "issue_date", "xml_path": ["P"],
                              "static": "now", "validation": {"type": "date", "format": "d/m/Y"}}}),
        )
        .unwrap();
        assert_eq!(defs.len(), 1);
    }

    #[test]
    fn test_computed_field_absent_source_is_valid() {
        let defs = run(
            json!({}),
            json!({"occasionalDriver": {"field": "occasionalDriver", "maps_to": "driver_flag",
                                        "computed": true, "xml_path": ["P"],
                                        "validation": {"type": "string"}}}),
        )
        .unwrap();
        assert_eq!(defs.len(), 1);
    }

    #[test]
    fn test_computed_field_type_checked_but_not_enum_checked() {
        let definitions = json!({"occasionalDriver": {"field": "occasionalDriver", "maps_to": "driver_flag",
                                                      "computed": true, "xml_path": ["P"],
                                                      "validation": {"type": "string"},
                                                      "values": {"S": "yes"}}});
        assert!(run(json!({"occasionalDriver": "SI"}), definitions.clone()).is_ok());

        let err = run(json!({"occasionalDriver": 1}), definitions).unwrap_err();
        assert_eq!(messages(&err, "occasionalDriver"), vec!["Must be a string"]);
    }

    #[test]
    fn test_unknown_validator_type_is_fatal() {
        let err = run(
            json!({"id": "x"}),
            json!({"id": {"field": "id", "maps_to": "id", "xml_path": ["P"], "validation": {"type": "uuid"}}}),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownValidator { .. }));
    }

    #[test]
    fn test_malformed_definition_is_fatal() {
        let err = run(
            json!({}),
            json!({"id": {"maps_to": "id", "xml_path": ["P"]}}),
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedDefinition { .. }));
    }

    #[test]
    fn test_enum_keys_match_numbers() {
        let defs = run(
            json!({"level": 2}),
            json!({"level": {"field": "level", "maps_to": "l", "xml_path": ["P"],
                             "values": {"1": "Low", "2": "High"}}}),
        )
        .unwrap();
        assert_eq!(defs.len(), 1);
    }
}
