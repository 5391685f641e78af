//! Shared test support utilities for integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use fieldmap_core::{FixedClock, Mapping, Pipeline, Record};
use serde_json::{json, Value};

/// Clock frozen at 2025-02-17 10:30:00
pub fn fixed_clock() -> FixedClock {
    let at = NaiveDate::from_ymd_opt(2025, 2, 17)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();
    FixedClock(at)
}

/// Pipeline with built-ins and a frozen clock
pub fn pipeline() -> Pipeline {
    Pipeline::builder().clock(fixed_clock()).build()
}

/// Turn a `json!` object into a record
pub fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap_or_default()
}

/// Mapping with root `Request` around the given definitions
pub fn mapping(definitions: Value) -> Mapping {
    Mapping::from_value(&json!({
        "root": "Request",
        "field_definitions": definitions,
    }))
    .unwrap()
}

/// Insurance-style mapping exercising every definition feature
pub fn policy_mapping() -> Mapping {
    mapping(json!({
        "name": {
            "field": "name",
            "maps_to": "holder_name",
            "required": true,
            "validation": {"type": "string"},
            "xml_path": ["Policy/Holder"]
        },
        "birthDate": {
            "field": "birthDate",
            "maps_to": "birth_date",
            "required": true,
            "validation": {"type": "date", "format": "d/m/Y"},
            "xml_path": ["Policy/Holder"]
        },
        "age": {
            "field": "age",
            "maps_to": "holder_age",
            "validation": {"type": "integer", "min": 18, "max": 99},
            "xml_path": ["Policy/Holder"]
        },
        "gender": {
            "field": "gender",
            "maps_to": "holder_gender",
            "validation": {"type": "string", "allowed_values": ["M", "F"]},
            "values": {"M": "Male", "F": "Female"},
            "xml_path": ["Policy/Holder"]
        },
        "effectiveDate": {
            "field": "effectiveDate",
            "maps_to": "effective_date",
            "static": "now",
            "validation": {"type": "date", "output_format": "Y-m-d\\TH:i:s"},
            "xml_path": ["Policy/Dates"]
        },
        "currency": {
            "field": "currency",
            "maps_to": "currency",
            "static": "EUR",
            "xml_path": ["Policy/Dates", "Summary"]
        },
        "occasionalDriver": {
            "field": "occasionalDriver",
            "maps_to": "driver_flag",
            "computed": true,
            "xml_path": ["Policy/Drivers"]
        },
        "internalNote": {
            "field": "internalNote",
            "maps_to": "note",
            "description": "Never sent, has no placement"
        }
    }))
}
