//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine reports to its callers. Ordinary absence
//! (an unknown employee or period) is never an error; it is returned as
//! `None` by the query operations.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidEmployee {
///     field: "salary".to_string(),
///     message: "must be positive".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid employee field 'salary': must be positive");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was out of range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration key.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// An employee record failed validation.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A period key was not a valid YYYYMM label.
    #[error("Invalid period key '{key}': {message}")]
    InvalidPeriodKey {
        /// The rejected key.
        key: String,
        /// A description of what made the key invalid.
        message: String,
    },

    /// An employee with the same identifier is already stored.
    #[error("Employee already exists: {id}")]
    EmployeeAlreadyExists {
        /// The duplicated identifier.
        id: String,
    },

    /// A payroll period was already generated for the key.
    #[error("Payroll period already exists: {period_key}")]
    PeriodAlreadyExists {
        /// The duplicated period key.
        period_key: String,
    },

    /// Persisted data could not be read.
    #[error("Failed to read '{path}': {message}")]
    StorageRead {
        /// The file or directory being read.
        path: String,
        /// The underlying I/O error.
        message: String,
    },

    /// Persisted data could not be written.
    #[error("Failed to write '{path}': {message}")]
    StorageWrite {
        /// The file being written.
        path: String,
        /// The underlying I/O or encoding error.
        message: String,
    },

    /// A period snapshot exists but does not decode to a consistent period.
    #[error("Corrupt payroll snapshot '{path}': {message}")]
    CorruptSnapshot {
        /// The snapshot file.
        path: String,
        /// What was wrong with it.
        message: String,
    },
}

impl EngineError {
    /// Returns true for failures caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidEmployee { .. } | EngineError::InvalidPeriodKey { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
