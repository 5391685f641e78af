//! Fieldmap Core - configuration-driven field mapping engine
//!
//! This crate takes a flat input record and a declarative mapping
//! configuration and produces a validated, normalized value map plus a nested
//! tree ready for XML rendering.
//!
//! # Main Components
//!
//! - **Field Definitions**: the per-field contract (source, target, type, statics, enum table, paths)
//! - **Validator Set**: `string`, `integer` and `date` validators behind a name registry
//! - **Static Values**: literal fallbacks and symbolic tokens such as `now`
//! - **Pipeline**: field validator → field mapper → computed fields → structure builder
//! - **Error Handling**: one `thiserror` enum separating bad input from bad configuration
//!
//! # Example
//!
//! ```
//! use fieldmap_core::{Pipeline, Result};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let config = json!({
//!         "root": "Request",
//!         "field_definitions": {
//!             "occasionalDriver": {
//!                 "field": "occasionalDriver",
//!                 "maps_to": "driver_flag",
//!                 "computed": true,
//!                 "xml_path": ["Policy/Drivers"]
//!             }
//!         }
//!     });
//!     let input = json!({"occasionalDriver": "SI"}).as_object().cloned().unwrap_or_default();
//!
//!     let outcome = Pipeline::new().execute_raw(&input, &config)?;
//!     assert_eq!(outcome.values["driver_flag"], 1);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod computed;
pub mod date_format;
pub mod definition;
pub mod error;
pub mod field_validator;
pub mod mapper;
pub mod mapping;
pub mod pipeline;
pub mod static_value;
pub mod structure;
pub mod validator;

// Re-export main types for convenience
pub use computed::{ComputeRule, ComputedFieldResolver};
pub use definition::{FieldDefinition, FieldDefinitionBuilder, RawFieldDefinition, ValidationRule};
pub use error::{Error, FieldValidationErrors, Result};
pub use field_validator::FieldValidator;
pub use mapper::FieldMapper;
pub use mapping::{MappedData, Mapping, MappingOutcome, Record};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use static_value::{
    Clock, FixedClock, NowHandler, Side, StaticHandler, StaticResolver, StaticValue, SystemClock,
};
pub use structure::StructureBuilder;
pub use validator::{
    DateValidator, IntegerValidator, StringValidator, ValidationResult, Validator,
    ValidatorFactory,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
