//! Validation command handler

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use fieldmap_core::{FieldValidationErrors, Pipeline};
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::utils::load_sources;

/// Outcome of the validation stage, as reported to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    /// Definitions accepted for mapping
    pub accepted: usize,
    #[serde(skip_serializing_if = "FieldValidationErrors::is_empty")]
    pub errors: FieldValidationErrors,
}

/// Handle the validate command
#[instrument(skip(config, output), fields(input = ?args.source.input, mapping = ?args.source.mapping))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("validate_command");
    let sources = load_sources(&args.source, config)?;

    output.info(&format!(
        "Validating {} against {}",
        sources.input_path.display(),
        sources.mapping_path.display()
    ))?;

    let report = validation_report(&Pipeline::new(), &sources.inputs, &sources.mapping)?;
    write_report(output, &report)?;

    if report.valid {
        info!(accepted = report.accepted, "Validation passed");
        Ok(())
    } else {
        warn!(fields = report.errors.len(), "Validation failed");
        Err(Error::ValidationFailed {
            fields: report.errors.len(),
        })
    }
}

/// Run the validation stage and fold field failures into a report.
///
/// Configuration faults are not field failures and are returned as errors.
pub fn validation_report(
    pipeline: &Pipeline,
    inputs: &fieldmap_core::Record,
    mapping: &fieldmap_core::Mapping,
) -> Result<ValidationReport> {
    match pipeline.validate(inputs, mapping) {
        Ok(accepted) => Ok(ValidationReport {
            valid: true,
            accepted: accepted.len(),
            errors: FieldValidationErrors::new(),
        }),
        Err(fieldmap_core::Error::FieldValidation(errors)) => Ok(ValidationReport {
            valid: false,
            accepted: 0,
            errors,
        }),
        Err(other) => Err(other.into()),
    }
}

fn write_report(output: &mut OutputWriter, report: &ValidationReport) -> Result<()> {
    if !output.is_human() {
        return output.data(report);
    }

    if report.valid {
        output.success(&format!(
            "✓ Input is valid ({} field definition(s) accepted)",
            report.accepted
        ))
    } else {
        output.field_errors(&report.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::test_support::{captured, write, Fixture, INVALID_INPUT, VALID_INPUT};
    use serde_json::{json, Value};

    #[test]
    fn test_valid_input_human() {
        let fixture = Fixture::new(VALID_INPUT);
        let (mut output, buffer) = captured(OutputFormat::Human);
        handle_validate(ValidateArgs { source: fixture.source() }, &Config::default(), &mut output)
            .unwrap();

        let text = buffer.contents();
        assert!(text.starts_with("INFO: Validating"));
        assert!(text.ends_with("✓ Input is valid (5 field definition(s) accepted)\n"));
    }

    #[test]
    fn test_invalid_input_human() {
        let fixture = Fixture::new(INVALID_INPUT);
        let (mut output, buffer) = captured(OutputFormat::Human);
        let err = handle_validate(ValidateArgs { source: fixture.source() }, &Config::default(), &mut output)
            .unwrap_err();

        assert!(matches!(err, Error::ValidationFailed { fields: 3 }));
        let text = buffer.contents();
        assert!(text.contains("✗ Validation Failed - 3 field(s)"));
        assert!(text.contains("  age:\n    • Value must be >= 18\n"));
        assert!(text.contains("  gender:\n    • Not allowed value\n"));
    }

    #[test]
    fn test_invalid_input_json() {
        let fixture = Fixture::new(INVALID_INPUT);
        let (mut output, buffer) = captured(OutputFormat::Json);
        assert!(handle_validate(ValidateArgs { source: fixture.source() }, &Config::default(), &mut output)
            .is_err());

        let report: Value = serde_json::from_str(buffer.contents().trim()).unwrap();
        assert_eq!(report["valid"], json!(false));
        assert_eq!(report["errors"]["gender"], json!(["Not allowed value"]));
    }

    #[test]
    fn test_valid_input_json_omits_errors() {
        let fixture = Fixture::new(VALID_INPUT);
        let (mut output, buffer) = captured(OutputFormat::Json);
        handle_validate(ValidateArgs { source: fixture.source() }, &Config::default(), &mut output)
            .unwrap();

        let report: Value = serde_json::from_str(buffer.contents().trim()).unwrap();
        assert_eq!(report, json!({"valid": true, "accepted": 5}));
    }

    #[test]
    fn test_unknown_validator_is_not_a_field_failure() {
        let fixture = Fixture::new(VALID_INPUT);
        let mapping = write(
            fixture.dir.path(),
            "uuid.yaml",
            "root: R\nfield_definitions:\n  name:\n    field: name\n    maps_to: n\n    validation:\n      type: uuid\n    xml_path: [P]\n",
        );
        let (mut output, _buffer) = captured(OutputFormat::Human);
        let args = ValidateArgs {
            source: crate::cli::SourceArgs {
                input: Some(fixture.input.clone()),
                mapping: Some(mapping),
            },
        };

        let err = handle_validate(args, &Config::default(), &mut output).unwrap_err();
        assert!(matches!(
            err,
            Error::Core(fieldmap_core::Error::UnknownValidator { .. })
        ));
        assert_eq!(err.exit_code(), 3);
    }
}
