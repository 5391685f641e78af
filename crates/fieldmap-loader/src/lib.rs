//! Fieldmap Loader - input records and mapping specifications from disk
//!
//! [`InputParser`] reads one JSON input record; [`MappingProvider`] reads a
//! YAML or JSON mapping document. Both report a missing file, an unreadable
//! file, malformed content and empty content as distinct [`LoaderError`]s and
//! never retry.
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod input;
pub mod mapping;
pub mod parser;

pub use error::{LoaderError, LoaderResult};
pub use input::InputParser;
pub use mapping::MappingProvider;
pub use parser::Format;
