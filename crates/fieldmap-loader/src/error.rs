//! Error types for input and mapping loading
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Failure modes of reading an input record or a mapping file
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Path does not exist
    #[error("File not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Path exists but could not be read
    #[error("Failed to read file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON syntax errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// YAML syntax errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Unsupported file extension
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// Document decodes to nothing
    #[error("File '{path}' is empty")]
    Empty { path: PathBuf },

    /// Document is not a key/value map at the top level
    #[error("Expected a map at the top level of '{path}', found {found}")]
    NotAnObject { path: PathBuf, found: String },

    /// YAML structure that has no JSON equivalent
    #[error("Unsupported YAML content in '{path}': {reason}")]
    UnsupportedYaml { path: PathBuf, reason: String },
}

impl LoaderError {
    pub fn not_found(path: &Path) -> Self {
        Self::NotFound {
            path: path.to_path_buf(),
        }
    }

    /// Create an I/O error with path context
    pub fn io_error(path: &Path, error: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source: error,
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: &Path, error: serde_json::Error) -> Self {
        Self::JsonParse {
            path: path.to_path_buf(),
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: &Path, error: serde_yaml::Error) -> Self {
        Self::YamlParse {
            path: path.to_path_buf(),
            source: error,
        }
    }

    pub fn unsupported_format(path: &Path) -> Self {
        Self::UnsupportedFormat {
            path: path.to_path_buf(),
        }
    }

    /// Get the path associated with this error
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::Io { path, .. }
            | Self::JsonParse { path, .. }
            | Self::YamlParse { path, .. }
            | Self::UnsupportedFormat { path }
            | Self::Empty { path }
            | Self::NotAnObject { path, .. }
            | Self::UnsupportedYaml { path, .. } => path,
        }
    }

    /// Whether the file content (rather than its location) is at fault
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            Self::JsonParse { .. }
                | Self::YamlParse { .. }
                | Self::Empty { .. }
                | Self::NotAnObject { .. }
                | Self::UnsupportedYaml { .. }
        )
    }
}
