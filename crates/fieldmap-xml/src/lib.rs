//! Fieldmap XML - renders nested mapping structures as XML
//!
//! [`XmlSerializer`] turns the tree produced by the core pipeline into
//! compact XML under a named root element; [`XmlPrettier`] re-indents it.
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod prettier;
pub mod serializer;

pub use error::{XmlError, XmlResult};
pub use prettier::XmlPrettier;
pub use serializer::XmlSerializer;
