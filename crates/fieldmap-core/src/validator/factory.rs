//! Name-to-validator registry
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use super::types::Validator;
use super::{DateValidator, IntegerValidator, StringValidator};
use crate::{Error, Result};
use std::collections::HashMap;

/// Resolves a `validation.type` name to its validator
#[derive(Debug)]
pub struct ValidatorFactory {
    validators: HashMap<String, Box<dyn Validator>>,
}

impl ValidatorFactory {
    /// Factory with the built-in `string`, `integer` and `date` validators
    pub fn new() -> Self {
        let mut factory = Self::empty();
        factory.register("string", StringValidator::new());
        factory.register("integer", IntegerValidator::new());
        factory.register("date", DateValidator::new());
        factory
    }

    /// Factory with nothing registered
    pub fn empty() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    /// Register or replace the validator for `type_name`
    pub fn register(&mut self, type_name: impl Into<String>, validator: impl Validator + 'static) {
        self.validators.insert(type_name.into(), Box::new(validator));
    }

    /// Look up a validator; an unknown name is a configuration fault
    pub fn get(&self, type_name: &str) -> Result<&dyn Validator> {
        self.validators
            .get(type_name)
            .map(Box::as_ref)
            .ok_or_else(|| Error::UnknownValidator {
                type_name: type_name.to_string(),
            })
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.validators.contains_key(type_name)
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ValidatorFactory {
    fn default() -> Self {
        Self::new()
    }
}
