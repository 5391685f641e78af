//! Computed field rules
//!
//! A computed field takes its value from a rule registered under the field's
//! source name instead of copying it from input. Rules are plain functions,
//! registered up front; adding a computed field to a mapping file means
//! registering a rule for it as well (see [`ComputedFieldResolver::register`]).
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use crate::definition::FieldDefinition;
use crate::mapping::{lookup, Record};
use crate::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use tracing::trace;

/// Computation for one field: definition and full input in, value out
pub type ComputeRule = fn(&FieldDefinition, &Record) -> Result<Value>;

/// Registry of computation rules keyed by source field name
#[derive(Debug, Clone)]
pub struct ComputedFieldResolver {
    rules: HashMap<String, ComputeRule>,
}

impl ComputedFieldResolver {
    /// Resolver with the built-in rules
    pub fn new() -> Self {
        let mut resolver = Self::empty();
        resolver.register("occasionalDriver", built_in::occasional_driver);
        resolver
    }

    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Register or replace the rule for `field`
    pub fn register(&mut self, field: impl Into<String>, rule: ComputeRule) {
        self.rules.insert(field.into(), rule);
    }

    pub fn has_rule(&self, field: &str) -> bool {
        self.rules.contains_key(field)
    }

    /// Compute every deferred definition, keyed by target field.
    ///
    /// A definition with no registered rule fails the whole call.
    pub fn compute(&self, definitions: &[FieldDefinition], inputs: &Record) -> Result<Record> {
        let mut computed = Record::new();

        for definition in definitions {
            let field = definition.source_field();
            let rule = self
                .rules
                .get(field)
                .ok_or_else(|| Error::UnimplementedComputation {
                    rule: rule_name(field),
                    field: field.to_string(),
                })?;

            let value = rule(definition, inputs)?;
            trace!(field, %value, "Computed");
            computed.insert(definition.target_field().to_string(), value);
        }

        Ok(computed)
    }
}

impl Default for ComputedFieldResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Conventional rule name for a field, e.g. `computeOccasionalDriver`
pub fn rule_name(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => format!("compute{}{}", first.to_uppercase(), chars.as_str()),
        None => "compute".to_string(),
    }
}

/// Rules shipped with the library
pub mod built_in {
    use super::*;

    /// Input value meaning "yes" for the occasional driver question
    pub const AFFIRMATIVE: &str = "SI";

    /// `1` when the source field holds `SI`, otherwise `0`
    pub fn occasional_driver(definition: &FieldDefinition, inputs: &Record) -> Result<Value> {
        let affirmative = lookup(inputs, definition.source_field())
            .and_then(Value::as_str)
            .is_some_and(|answer| answer == AFFIRMATIVE);
        Ok(Value::from(u8::from(affirmative)))
    }
}
