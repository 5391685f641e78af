//! Type validators for field values
//!
//! Each validator checks one value against a set of constraints and returns a
//! [`ValidationResult`]; none of them fail for a value of the wrong type, they
//! report it instead.
//!
//! The validator set is organized into focused modules:
//! - `types`: `ValidationResult` and the `Validator` trait
//! - `string`, `integer`, `date`: the built-in validators
//! - `factory`: name-to-validator registry
//! - `tests`: cross-validator test suite
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

pub mod types;
pub mod string;
pub mod integer;
pub mod date;
pub mod factory;


// Re-export public API
pub use types::{ValidationResult, Validator};
pub use string::StringValidator;
pub use integer::IntegerValidator;
pub use date::DateValidator;
pub use factory::ValidatorFactory;
