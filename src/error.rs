//! Error types for daktari operations.
//!
//! This module defines [`DaktariError`], the error type used by the
//! configuration, runner and shell layers, and a [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! - Checks never return errors: anything that goes wrong while inspecting
//!   the machine becomes a failing [`CheckResult`](crate::check::CheckResult)
//! - Use `DaktariError` for infrastructure failures (bad config, cycles)
//! - Use `anyhow::Error` (via `DaktariError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for daktari operations.
#[derive(Debug, Error)]
pub enum DaktariError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A check name that no check in this run answers to.
    #[error("Unknown check: {name}")]
    UnknownCheck { name: String },

    /// Check dependency cycle detected.
    #[error("Circular dependency detected: {cycle}")]
    CircularDependency { cycle: String },

    /// Shell command could not be started or waited on.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Shell command was killed after running past its timeout.
    #[error("Command timed out after {timeout:?}: {command}")]
    CommandTimedOut {
        command: String,
        timeout: std::time::Duration,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for daktari operations.
pub type Result<T> = std::result::Result<T, DaktariError>;
