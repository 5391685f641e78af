//! Static fallback values and symbolic tokens
//!
//! A field's `static` entry is either a literal fallback or the name of a
//! registered token such as `now`. Whether a string is a token is decided in
//! one place, [`StaticResolver::classify`], by registry membership.
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use crate::date_format::{self, DEFAULT_INPUT_FORMAT, DEFAULT_OUTPUT_FORMAT};
use crate::definition::FieldDefinition;
use chrono::{Local, NaiveDateTime};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{trace, warn};

/// Token producing the current timestamp
pub const NOW_TOKEN: &str = "now";

/// Validation key for the output-side date format
pub const OUTPUT_FORMAT_KEY: &str = "output_format";

/// Validation key for the input-side date format
pub const INPUT_FORMAT_KEY: &str = "format";

/// Source of the current time
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Which side of the pipeline a static value is resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Value checked by the field validator
    Input,
    /// Value written to the mapped output
    Output,
}

/// Generator behind a symbolic static token
pub trait StaticHandler: Send + Sync + fmt::Debug {
    fn resolve(&self, definition: &FieldDefinition, side: Side) -> Value;
}

/// `now`: current timestamp in the field's input or output date format
#[derive(Debug, Clone)]
pub struct NowHandler {
    clock: Arc<dyn Clock>,
}

impl NowHandler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl StaticHandler for NowHandler {
    fn resolve(&self, definition: &FieldDefinition, side: Side) -> Value {
        let (key, default) = match side {
            Side::Input => (INPUT_FORMAT_KEY, DEFAULT_INPUT_FORMAT),
            Side::Output => (OUTPUT_FORMAT_KEY, DEFAULT_OUTPUT_FORMAT),
        };
        let format = definition.validation_option(key).unwrap_or(default);
        let now = self.clock.now();

        let formatted = date_format::format_datetime(&now, format).or_else(|| {
            warn!(
                field = definition.source_field(),
                format, "Unusable date format for static token, using default"
            );
            date_format::format_datetime(&now, default)
        });

        formatted.map(Value::String).unwrap_or(Value::Null)
    }
}

/// A `static` entry after registry lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StaticValue<'a> {
    /// Name of a registered handler
    Token(&'a str),
    /// Used as-is
    Literal(&'a Value),
}

/// Registry of static tokens
#[derive(Debug)]
pub struct StaticResolver {
    handlers: HashMap<String, Box<dyn StaticHandler>>,
}

impl StaticResolver {
    /// Resolver with the `now` token bound to `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let mut resolver = Self {
            handlers: HashMap::new(),
        };
        resolver.register(NOW_TOKEN, NowHandler::new(clock));
        resolver
    }

    /// Register or replace a token handler
    pub fn register(&mut self, token: impl Into<String>, handler: impl StaticHandler + 'static) {
        self.register_boxed(token, Box::new(handler));
    }

    pub fn register_boxed(&mut self, token: impl Into<String>, handler: Box<dyn StaticHandler>) {
        self.handlers.insert(token.into(), handler);
    }

    pub fn is_token(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn classify<'a>(&self, value: &'a Value) -> StaticValue<'a> {
        match value {
            Value::String(name) if self.is_token(name) => StaticValue::Token(name),
            other => StaticValue::Literal(other),
        }
    }

    /// Fallback value checked during validation
    pub fn resolve_for_input(&self, definition: &FieldDefinition) -> Option<Value> {
        self.resolve(definition, Side::Input)
    }

    /// Fallback value written during mapping
    pub fn resolve_for_output(&self, definition: &FieldDefinition) -> Option<Value> {
        self.resolve(definition, Side::Output)
    }

    fn resolve(&self, definition: &FieldDefinition, side: Side) -> Option<Value> {
        let raw = definition.static_value()?;
        let value = match self.classify(raw) {
            StaticValue::Token(name) => {
                trace!(field = definition.source_field(), token = name, ?side, "Resolving static token");
                self.handlers
                    .get(name)
                    .map(|handler| handler.resolve(definition, side))
                    .unwrap_or(Value::Null)
            }
            StaticValue::Literal(value) => value.clone(),
        };
        Some(value)
    }
}

impl Default for StaticResolver {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}
