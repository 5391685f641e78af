//! Preview command handler

use crate::cli::PreviewArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use fieldmap_core::{MappingOutcome, Pipeline};
use tracing::{info, instrument};

use super::utils::load_sources;

/// Handle the preview command
#[instrument(skip(config, output), fields(input = ?args.source.input, mapping = ?args.source.mapping))]
pub fn handle_preview(args: PreviewArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("preview_command");
    let sources = load_sources(&args.source, config)?;

    let outcome = Pipeline::new().execute(&sources.inputs, &sources.mapping)?;
    info!(
        root = %outcome.root,
        values = outcome.values.len(),
        "Preview computed"
    );

    write_outcome(output, &outcome, &args)
}

fn write_outcome(output: &mut OutputWriter, outcome: &MappingOutcome, args: &PreviewArgs) -> Result<()> {
    if args.values_only {
        output.section("Mapped Values")?;
        return output.data(&outcome.values);
    }
    if args.structure_only {
        output.section(&format!("Structure <{}>", outcome.root))?;
        return output.data(&outcome.structure);
    }
    if !output.is_human() {
        return output.data(outcome);
    }

    output.section("Mapped Values")?;
    output.data(&outcome.values)?;
    output.section(&format!("Structure <{}>", outcome.root))?;
    output.data(&outcome.structure)
}
