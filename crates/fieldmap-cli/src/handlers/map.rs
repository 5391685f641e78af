//! Map command handler: input record to XML request

use crate::cli::MapArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use fieldmap_core::{Mapping, Pipeline, Record};
use fieldmap_xml::{XmlPrettier, XmlSerializer};
use std::fs;
use tracing::{debug, info, instrument};

use super::utils::load_sources;

/// Handle the map command
#[instrument(skip(config, output), fields(input = ?args.source.input, mapping = ?args.source.mapping))]
pub fn handle_map(args: MapArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("map_command");
    let sources = load_sources(&args.source, config)?;
    let pretty = config.output.pretty && !args.compact;

    output.debug(&format!(
        "Mapping {} with {}",
        sources.input_path.display(),
        sources.mapping_path.display()
    ))?;

    let xml = render_request(&Pipeline::new(), &sources.inputs, &sources.mapping, pretty)?;

    match args.save_to {
        Some(path) => {
            fs::write(&path, &xml)?;
            info!(path = %path.display(), bytes = xml.len(), "XML request saved");
            output.success(&format!("✓ XML request saved to {}", path.display()))?;
        }
        None => output.write(&xml)?,
    }

    Ok(())
}

/// Run the pipeline and render its tree under the mapping's root element
pub fn render_request(
    pipeline: &Pipeline,
    inputs: &Record,
    mapping: &Mapping,
    pretty: bool,
) -> Result<String> {
    let outcome = {
        let _timer = Timer::new("pipeline");
        pipeline.execute(inputs, mapping)?
    };

    let _timer = Timer::new("xml_rendering");
    let xml = XmlSerializer::new().serialize(&outcome.root, &outcome.structure)?;
    debug!(bytes = xml.len(), pretty, "XML rendered");

    if pretty {
        Ok(XmlPrettier::new().pretty(&xml)?)
    } else {
        Ok(xml)
    }
}
