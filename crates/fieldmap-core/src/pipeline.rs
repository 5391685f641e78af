//! Pipeline orchestrator: validate, map, compute, nest
//!
//! [`Pipeline`] owns the registries (validators, static tokens, computed
//! rules) and is the only entry point callers need. It holds no per-run
//! state, so one instance can serve concurrent runs.
//!
//! ```
//! use fieldmap_core::{Mapping, Pipeline};
//! use serde_json::json;
//!
//! let mapping = Mapping::from_value(&json!({
//!     "root": "Request",
//!     "field_definitions": {
//!         "name": {"field": "name", "maps_to": "dummy_name", "xml_path": ["Dummy/Name"]}
//!     }
//! })).unwrap();
//! let input = json!({"name": "Ali"}).as_object().unwrap().clone();
//!
//! let outcome = Pipeline::new().execute(&input, &mapping).unwrap();
//! assert_eq!(outcome.structure["Dummy"]["Name"]["dummy_name"], "Ali");
//! ```
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use crate::computed::{ComputeRule, ComputedFieldResolver};
use crate::definition::FieldDefinition;
use crate::field_validator::FieldValidator;
use crate::mapper::FieldMapper;
use crate::mapping::{Mapping, MappingOutcome, Record};
use crate::static_value::{Clock, StaticHandler, StaticResolver, SystemClock};
use crate::structure::StructureBuilder;
use crate::validator::{Validator, ValidatorFactory};
use crate::Result;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info_span};

/// The validate → map → compute → build pipeline
#[derive(Debug)]
pub struct Pipeline {
    validators: ValidatorFactory,
    statics: StaticResolver,
    rules: ComputedFieldResolver,
    structure: StructureBuilder,
}

impl Pipeline {
    /// Pipeline with the built-in validators, the `now` token on the system
    /// clock and the built-in computed rules
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Run the validation stage only
    pub fn validate(&self, inputs: &Record, mapping: &Mapping) -> Result<Vec<FieldDefinition>> {
        let _span = info_span!("validate", fields = mapping.field_definitions().len()).entered();
        FieldValidator::new(&self.validators, &self.statics)
            .validate(inputs, mapping.field_definitions())
    }

    /// Run the full pipeline for one input record
    pub fn execute(&self, inputs: &Record, mapping: &Mapping) -> Result<MappingOutcome> {
        let definitions = self.validate(inputs, mapping)?;

        let mapped = {
            let _span = info_span!("map", definitions = definitions.len()).entered();
            FieldMapper::new(&self.statics).map(inputs, &definitions)
        };

        let computed = if mapped.computed.is_empty() {
            Record::new()
        } else {
            let _span = info_span!("compute", fields = mapped.computed.len()).entered();
            self.rules.compute(&mapped.computed, inputs)?
        };

        let values = mapped.merge(computed);

        let structure = {
            let _span = info_span!("build_structure", values = values.len()).entered();
            self.structure.build(&values, &definitions)
        };

        debug!(root = mapping.root(), values = values.len(), "Pipeline complete");
        Ok(MappingOutcome {
            root: mapping.root().to_string(),
            values,
            structure,
        })
    }

    /// Run the full pipeline against a raw mapping document
    pub fn execute_raw(&self, inputs: &Record, config: &Value) -> Result<MappingOutcome> {
        let mapping = Mapping::from_value(config)?;
        self.execute(inputs, &mapping)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Configures the registries of a [`Pipeline`]
#[derive(Debug)]
pub struct PipelineBuilder {
    clock: Arc<dyn Clock>,
    validators: ValidatorFactory,
    statics: Vec<(String, Box<dyn StaticHandler>)>,
    rules: ComputedFieldResolver,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            validators: ValidatorFactory::new(),
            statics: Vec::new(),
            rules: ComputedFieldResolver::new(),
        }
    }

    /// Clock used by the `now` token
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Add or replace a type validator
    pub fn register_validator(
        mut self,
        type_name: impl Into<String>,
        validator: impl Validator + 'static,
    ) -> Self {
        self.validators.register(type_name, validator);
        self
    }

    /// Add or replace a static token
    pub fn register_static(
        mut self,
        token: impl Into<String>,
        handler: impl StaticHandler + 'static,
    ) -> Self {
        self.statics.push((token.into(), Box::new(handler)));
        self
    }

    /// Add or replace the computation rule for a field
    pub fn register_rule(mut self, field: impl Into<String>, rule: ComputeRule) -> Self {
        self.rules.register(field, rule);
        self
    }

    pub fn build(self) -> Pipeline {
        let mut statics = StaticResolver::new(self.clock);
        for (token, handler) in self.statics {
            statics.register_boxed(token, handler);
        }

        Pipeline {
            validators: self.validators,
            statics,
            rules: self.rules,
            structure: StructureBuilder::new(),
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
