// Tests for output formatting
//
// These tests verify the human, JSON and YAML renderings of command results
// and field validation reports.

use super::*;
use crate::test_support::captured;
use pretty_assertions::assert_eq;
use serde_json::json;

fn sample_errors() -> FieldValidationErrors {
    let mut errors = FieldValidationErrors::new();
    errors.record("gender", ["Not allowed value"]);
    errors.record("age", ["Must be a number", "Value must be >= 18"]);
    errors
}

#[test]
fn test_field_errors_human() {
    let text = OutputFormat::Human.format_field_errors(&sample_errors()).unwrap();
    assert_eq!(
        text,
        "✗ Validation Failed - 2 field(s)\n  age:\n    • Must be a number\n    • Value must be >= 18\n  gender:\n    • Not allowed value\n"
    );
}

#[test]
fn test_field_errors_json() {
    let text = OutputFormat::Json.format_field_errors(&sample_errors()).unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        parsed,
        json!({"age": ["Must be a number", "Value must be >= 18"], "gender": ["Not allowed value"]})
    );
}

#[test]
fn test_field_errors_yaml() {
    let text = OutputFormat::Yaml.format_field_errors(&sample_errors()).unwrap();
    assert!(text.contains("gender:\n- Not allowed value"));
}

#[test]
fn test_human_outline() {
    let value = json!({
        "Policy": {"Holder": {"name": "Ali", "age": 30}, "Drivers": [{"flag": 1}]},
        "empty": {}
    });
    let text = OutputFormat::Human.format(&value).unwrap();
    assert_eq!(
        text,
        "Policy:\n  Holder:\n    name: \"Ali\"\n    age: 30\n  Drivers:\n    -\n      flag: 1\nempty: {}"
    );
}

#[test]
fn test_messages_suppressed_for_machine_formats() {
    let (mut output, buffer) = captured(OutputFormat::Json);
    output.info("loading").unwrap();
    output.success("done").unwrap();
    output.section("Values").unwrap();
    output.data(&json!({"a": 1})).unwrap();
    assert_eq!(buffer.contents(), "{\"a\":1}\n");
}

#[test]
fn test_human_messages_without_color() {
    let (mut output, buffer) = captured(OutputFormat::Human);
    output.info("loading").unwrap();
    output.section("Values").unwrap();
    output.success("done").unwrap();
    assert_eq!(
        buffer.contents(),
        "INFO: loading\n\n=== Values ===\ndone\n"
    );
}

#[test]
fn test_quiet_suppresses_info_but_not_data() {
    let buffer = crate::test_support::SharedBuffer::default();
    let mut output =
        OutputWriter::with_writer(OutputFormat::Human, false, true, 0, Box::new(buffer.clone()));
    output.info("hidden").unwrap();
    output.success("hidden").unwrap();
    output.writeln("<xml/>").unwrap();
    assert_eq!(buffer.contents(), "<xml/>\n");
}

#[test]
fn test_debug_needs_verbosity() {
    let buffer = crate::test_support::SharedBuffer::default();
    let mut output =
        OutputWriter::with_writer(OutputFormat::Human, false, false, 1, Box::new(buffer.clone()));
    output.debug("details").unwrap();
    assert_eq!(buffer.contents(), "DEBUG: details\n");

    let (mut silent, silent_buffer) = captured(OutputFormat::Human);
    silent.debug("details").unwrap();
    assert_eq!(silent_buffer.contents(), "");
}
