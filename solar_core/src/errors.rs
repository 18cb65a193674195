//! # Error Types
//!
//! Structured error types for solar_core. The sizing engine itself is total
//! and never returns these; they belong to the fallible surroundings
//! (input validation for front-ends, settings loading, project files).
//!
//! ## Example
//!
//! ```rust
//! use solar_core::errors::{SolarError, SolarResult};
//!
//! fn validate_tariff(tariff: f64) -> SolarResult<()> {
//!     if tariff <= 0.0 {
//!         return Err(SolarError::invalid_input(
//!             "energy_tariff",
//!             tariff.to_string(),
//!             "Tariff must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for solar_core operations
pub type SolarResult<T> = Result<T, SolarError>;

/// Structured error type for fallible solar_core operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SolarError {
    /// An input value is invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Label not present in a catalog (modules, inverters, roof types)
    #[error("Unknown {catalog} entry: {label}")]
    UnknownCatalogEntry { catalog: String, label: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SolarError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        SolarError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        SolarError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownCatalogEntry error
    pub fn unknown_catalog_entry(catalog: impl Into<String>, label: impl Into<String>) -> Self {
        SolarError::UnknownCatalogEntry {
            catalog: catalog.into(),
            label: label.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        SolarError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        SolarError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        SolarError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SolarError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SolarError::InvalidInput { .. } => "INVALID_INPUT",
            SolarError::MissingField { .. } => "MISSING_FIELD",
            SolarError::UnknownCatalogEntry { .. } => "UNKNOWN_CATALOG_ENTRY",
            SolarError::FileError { .. } => "FILE_ERROR",
            SolarError::FileLocked { .. } => "FILE_LOCKED",
            SolarError::SerializationError { .. } => "SERIALIZATION_ERROR",
            SolarError::VersionMismatch { .. } => "VERSION_MISMATCH",
            SolarError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
