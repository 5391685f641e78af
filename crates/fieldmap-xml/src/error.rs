//! Error types for XML rendering
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Result type for XML operations
pub type XmlResult<T> = Result<T, XmlError>;

/// Failures while rendering or re-indenting XML
#[derive(Error, Debug)]
pub enum XmlError {
    /// A tree key cannot be used as an element or attribute name
    #[error("Invalid XML name '{name}'")]
    InvalidElementName { name: String },

    /// Writing to the output buffer failed
    #[error("Failed to write XML: {0}")]
    Write(#[from] std::io::Error),

    /// Input to the prettier is not well-formed
    #[error("Failed to read XML: {0}")]
    Read(String),

    /// Rendered bytes are not UTF-8
    #[error("XML output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<quick_xml::Error> for XmlError {
    fn from(error: quick_xml::Error) -> Self {
        Self::Read(error.to_string())
    }
}

impl XmlError {
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidElementName { name: name.into() }
    }
}
