//! Nested structure builder
//!
//! Turns the flat value map into a tree keyed by path segments. Fields that
//! share a path prefix share the nodes along it.
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use crate::definition::FieldDefinition;
use crate::mapping::Record;
use serde_json::{Map, Value};
use tracing::{trace, warn};

/// Separator between path segments
pub const PATH_SEPARATOR: char = '/';

/// Builds the nested tree handed to the XML renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct StructureBuilder;

impl StructureBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Place every definition's value at each of its paths.
    ///
    /// A definition with no entry in `values` still creates its path nodes
    /// but contributes no leaf. When two fields write the same leaf, the
    /// later one wins.
    pub fn build(&self, values: &Record, definitions: &[FieldDefinition]) -> Record {
        let mut tree = Record::new();

        for definition in definitions {
            let key = definition.target_field();
            let value = values.get(key);
            for path in definition.xml_paths() {
                place(&mut tree, path, key, value);
            }
        }

        tree
    }
}

fn place(tree: &mut Record, path: &str, key: &str, value: Option<&Value>) {
    let mut node = tree;

    for segment in path.split(PATH_SEPARATOR).filter(|s| !s.is_empty()) {
        let child = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !child.is_object() {
            warn!(path, segment, "Replacing leaf value with a path node");
            *child = Value::Object(Map::new());
        }
        let Value::Object(next) = child else {
            return;
        };
        node = next;
    }

    match value {
        Some(value) => {
            trace!(path, key, "Placing value");
            node.insert(key.to_string(), value.clone());
        }
        None => trace!(path, key, "No value to place"),
    }
}
