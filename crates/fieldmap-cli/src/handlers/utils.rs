//! Shared utilities for command handlers

use crate::cli::SourceArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use fieldmap_core::{Mapping, Record};
use fieldmap_loader::{InputParser, MappingProvider};
use std::path::{Path, PathBuf};
use tracing::debug;

/// An input record and the mapping to run it through
#[derive(Debug)]
pub struct Sources {
    pub input_path: PathBuf,
    pub mapping_path: PathBuf,
    pub inputs: Record,
    pub mapping: Mapping,
}

/// Resolve the input and mapping paths against the config, then load both
pub fn load_sources(args: &SourceArgs, config: &Config) -> Result<Sources> {
    let input_path = config.resolve_input(args.input.as_deref())?;
    let mapping_path = config.resolve_mapping(args.mapping.as_deref())?;

    let inputs = load_input(&input_path)?;
    let mapping = load_mapping(&mapping_path)?;

    Ok(Sources {
        input_path,
        mapping_path,
        inputs,
        mapping,
    })
}

/// Read a JSON input record
pub fn load_input(path: &Path) -> Result<Record> {
    let _timer = Timer::with_details("input_loading", &path.display().to_string());
    let record = InputParser::new().parse(path)?;
    debug!(fields = record.len(), "Input record loaded");
    Ok(record)
}

/// Read a mapping file and check its top-level shape
pub fn load_mapping(path: &Path) -> Result<Mapping> {
    let _timer = Timer::with_details("mapping_loading", &path.display().to_string());
    let raw = MappingProvider::new().load(path)?;
    let mapping = Mapping::from_value(&raw)?;
    debug!(
        root = mapping.root(),
        definitions = mapping.field_definitions().len(),
        "Mapping loaded"
    );
    Ok(mapping)
}
