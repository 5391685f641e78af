//! Error types and handling for the CLI
//!
//! This module wraps the library errors and maps each failure class to a
//! stable process exit code.

use colored::Colorize;
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from the mapping pipeline
    #[error("{0}")]
    Core(#[from] fieldmap_core::Error),

    /// Error while reading the input record or mapping file
    #[error("{0}")]
    Loader(#[from] fieldmap_loader::LoaderError),

    /// Error while rendering XML
    #[error("{0}")]
    Xml(#[from] fieldmap_xml::XmlError),

    /// Validation reported failing fields (already printed)
    #[error("Validation failed for {fields} field(s)")]
    ValidationFailed { fields: usize },

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(e) if e.is_validation_error() => 2,
            Self::ValidationFailed { .. } => 2,
            Self::Core(_) => 3,
            Self::Loader(fieldmap_loader::LoaderError::NotFound { .. })
            | Self::FileNotFound { .. } => 4,
            Self::Loader(_) => 5,
            Self::Xml(_) => 6,
            Self::Config(_) => 7,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    let headline = if use_color {
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    };

    // Validation failures are listed field by field
    let Error::Core(core) = error else {
        return headline;
    };
    let Some(fields) = core.field_errors() else {
        return headline;
    };

    let mut lines = vec![if use_color {
        format!("{} Field validation failed", "Error:".red().bold())
    } else {
        "Error: Field validation failed".to_string()
    }];
    for (field, messages) in fields.iter() {
        let name = if use_color {
            field.bold().to_string()
        } else {
            field.to_string()
        };
        lines.push(format!("  {}: {}", name, messages.join(", ")));
    }
    lines.join("\n")
}
