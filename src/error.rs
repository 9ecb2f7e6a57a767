//! Error types for reportkit.

use crate::model::DocumentId;
use crate::render::RenderError;
use serde_json::{json, Map, Value};
use std::io;
use thiserror::Error;

/// Result type alias for reportkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while validating, building or generating a document.
#[derive(Error, Debug)]
pub enum Error {
    /// A style primitive rejected a malformed or out-of-range value.
    #[error("Invalid value for '{field}': {value} ({reason})")]
    Validation {
        /// Name of the offending field
        field: String,
        /// The value that was received, as text
        value: String,
        /// What the field requires
        reason: String,
    },

    /// The request is structurally unusable (missing title, no sections, ...).
    #[error("Invalid document: {message}")]
    InvalidDocument {
        /// Human-readable description
        message: String,
        /// Machine-readable context, e.g. `{"field": "title"}`
        details: Map<String, Value>,
    },

    /// The renderer failed while producing output for a document.
    #[error("Failed to generate document {document_id}: {source}")]
    Generation {
        /// ID of the document that was being rendered
        document_id: DocumentId,
        /// Underlying renderer failure
        #[source]
        source: RenderError,
    },

    /// I/O error when reading requests or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The request payload is not valid JSON for the expected shape.
    #[error("Malformed request: {0}")]
    Request(#[from] serde_json::Error),

    /// A configuration value could not be parsed.
    #[error("Invalid configuration value for {key}: {value}")]
    Config {
        /// Setting name (environment variable)
        key: String,
        /// The raw value
        value: String,
    },

    /// A background generation task was aborted before completing.
    #[error("Generation task cancelled: {0}")]
    Cancelled(String),
}

impl Error {
    pub(crate) fn validation(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Error::Validation {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_document(message: impl Into<String>, details: Value) -> Self {
        let details = match details {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Error::InvalidDocument {
            message: message.into(),
            details,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "VALIDATION_ERROR",
            Error::InvalidDocument { .. } => "INVALID_DOCUMENT",
            Error::Generation { .. } => "PDF_GENERATION_ERROR",
            Error::Io(_) => "IO_ERROR",
            Error::Request(_) => "MALFORMED_REQUEST",
            Error::Config { .. } => "INVALID_CONFIG",
            Error::Cancelled(_) => "CANCELLED",
        }
    }

    /// Additional context for the error.
    pub fn details(&self) -> Map<String, Value> {
        match self {
            Error::Validation { field, value, .. } => {
                let mut map = Map::new();
                map.insert("field".into(), Value::String(field.clone()));
                map.insert("value".into(), Value::String(value.clone()));
                map
            }
            Error::InvalidDocument { details, .. } => details.clone(),
            Error::Generation { document_id, .. } => {
                let mut map = Map::new();
                map.insert("document_id".into(), Value::String(document_id.to_string()));
                map
            }
            Error::Config { key, value } => {
                let mut map = Map::new();
                map.insert("key".into(), Value::String(key.clone()));
                map.insert("value".into(), Value::String(value.clone()));
                map
            }
            Error::Request(e) => {
                let mut map = Map::new();
                map.insert("line".into(), json!(e.line()));
                map.insert("column".into(), json!(e.column()));
                map
            }
            Error::Io(_) | Error::Cancelled(_) => Map::new(),
        }
    }

    /// Serialize into an `{error, message, details}` payload.
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.code(),
            "message": self.to_string(),
            "details": self.details(),
        })
    }

    /// Check if this error was raised before any rendering started.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. } | Error::InvalidDocument { .. } | Error::Request(_)
        )
    }
}
