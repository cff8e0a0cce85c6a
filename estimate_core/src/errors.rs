//! # Error Types
//!
//! Structured error types for estimate_core. Calculator evaluation itself
//! never fails (inputs coerce to zero and denominators are guarded), so these
//! errors cover the edges: unknown calculators or fields, CRUD form
//! validation, project files, configuration and report rendering.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::errors::{CalcError, CalcResult};
//! use estimate_core::catalog;
//!
//! fn title_of(id: &str) -> CalcResult<&'static str> {
//!     Ok(catalog::get(id)?.title)
//! }
//!
//! let err = title_of("no-such-page").unwrap_err();
//! assert_eq!(err.error_code(), "UNKNOWN_CALCULATOR");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for estimate_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for estimate operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input key or option is not part of the calculator form
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material not found in the density table
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// No calculator is registered under this id
    #[error("Unknown calculator: {id}")]
    UnknownCalculator { id: String },

    /// CRUD form failed required-field validation
    #[error("Validation failed for {} field(s)", .errors.len())]
    Validation { errors: BTreeMap<String, String> },

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

    /// Configuration file could not be read or written
    #[error("Config error: '{path}' - {reason}")]
    ConfigError { path: String, reason: String },

    /// PDF report compilation failed
    #[error("Report failed: {reason}")]
    ReportFailed { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create an UnknownCalculator error
    pub fn unknown_calculator(id: impl Into<String>) -> Self {
        CalcError::UnknownCalculator { id: id.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ConfigError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a ReportFailed error
    pub fn report_failed(reason: impl Into<String>) -> Self {
        CalcError::ReportFailed {
            reason: reason.into(),
        }
    }

    /// Field-keyed messages for a Validation error, if this is one
    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            CalcError::Validation { errors } => Some(errors),
            _ => None,
        }
    }

    /// Check if this is a recoverable error (user can fix and resubmit, or retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. } | CalcError::Validation { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::UnknownCalculator { .. } => "UNKNOWN_CALCULATOR",
            CalcError::Validation { .. } => "VALIDATION_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
            CalcError::ReportFailed { .. } => "REPORT_FAILED",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}
