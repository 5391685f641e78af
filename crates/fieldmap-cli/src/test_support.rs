//! Shared helpers for the CLI unit tests

use crate::cli::{OutputFormat, SourceArgs};
use crate::output::OutputWriter;
use std::cell::RefCell;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

/// In-memory sink that stays readable after the writer takes ownership
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Colorless, non-quiet writer capturing everything it prints
pub fn captured(format: OutputFormat) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let output = OutputWriter::with_writer(format, false, false, 0, Box::new(buffer.clone()));
    (output, buffer)
}

pub const MAPPING_YAML: &str = r#"root: InsuranceRequest
field_definitions:
  name:
    field: name
    maps_to: holder_name
    required: true
    validation:
      type: string
    xml_path:
      - Policy/Holder
  age:
    field: age
    maps_to: holder_age
    required: true
    validation:
      type: integer
      min: 18
      max: 99
    xml_path:
      - Policy/Holder
  gender:
    field: gender
    maps_to: holder_gender
    validation:
      type: string
      allowed_values: [M, F]
    values:
      M: Male
      F: Female
    xml_path:
      - Policy/Holder
  currency:
    field: currency
    maps_to: currency
    static: EUR
    xml_path:
      - Policy
  occasionalDriver:
    field: occasionalDriver
    maps_to: occasional_driver
    computed: true
    xml_path:
      - Policy/Drivers
"#;

pub const VALID_INPUT: &str =
    r#"{"name": "Ali", "age": 30, "gender": "M", "occasionalDriver": "SI"}"#;

pub const INVALID_INPUT: &str = r#"{"name": 42, "age": 12, "gender": "X"}"#;

/// Temporary directory holding a mapping and an input record
pub struct Fixture {
    pub dir: TempDir,
    pub mapping: PathBuf,
    pub input: PathBuf,
}

impl Fixture {
    pub fn new(input: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mapping = write(dir.path(), "mapping.yaml", MAPPING_YAML);
        let input = write(dir.path(), "input.json", input);
        Self { dir, mapping, input }
    }

    pub fn source(&self) -> SourceArgs {
        SourceArgs {
            input: Some(self.input.clone()),
            mapping: Some(self.mapping.clone()),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

pub fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
