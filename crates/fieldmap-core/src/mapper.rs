//! Field mapper: copies validated values to their target names
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use crate::definition::FieldDefinition;
use crate::mapping::{lookup, MappedData, Record};
use crate::static_value::StaticResolver;
use tracing::trace;

/// Maps input values onto target fields, deferring computed fields
#[derive(Debug)]
pub struct FieldMapper<'a> {
    statics: &'a StaticResolver,
}

impl<'a> FieldMapper<'a> {
    pub fn new(statics: &'a StaticResolver) -> Self {
        Self { statics }
    }

    /// Map `data` through already-validated definitions.
    ///
    /// Absent fields without a static fallback are left out of the result.
    /// Values found in a `values` table are replaced by their translation.
    pub fn map(&self, data: &Record, definitions: &[FieldDefinition]) -> MappedData {
        let mut result = MappedData::default();

        for definition in definitions {
            if definition.is_computed() {
                result.computed.push(definition.clone());
                continue;
            }

            let value = match lookup(data, definition.source_field()) {
                Some(value) => value.clone(),
                None => match self.statics.resolve_for_output(definition) {
                    Some(value) => value,
                    None => {
                        trace!(field = definition.source_field(), "Absent, not mapped");
                        continue;
                    }
                },
            };

            let value = definition.translate(&value).cloned().unwrap_or(value);
            result
                .mapped
                .insert(definition.target_field().to_string(), value);
        }

        result
    }
}
