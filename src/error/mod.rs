// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for cklint.
//!
//! Configuration problems are the only fatal condition inside the rule
//! engine. Rule failures are reported as findings, never as errors; the
//! [`ValidationError`] variant exists so the CLI can turn a failing result
//! into a non-zero exit status.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for cklint operations.
#[derive(Error, Debug)]
pub enum CkError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // Commit message input errors
    #[error("Commit error: {0}")]
    Commit(#[from] CommitError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
///
/// Raised while building a rule engine or loading rule declarations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Duplicate rule name: '{name}'")]
    DuplicateRule { name: String },

    #[error("Invalid parameters for rule '{rule}': {message}")]
    InvalidParameter { rule: String, message: String },

    #[error("Unknown preset: '{name}'")]
    UnknownPreset { name: String },

    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },
}

impl ConfigError {
    /// Shorthand for an [`ConfigError::InvalidParameter`].
    pub fn invalid(rule: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// Validation outcome errors, used for exit status only.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Commit message rejected: {errors} errors, {warnings} warnings")]
    Failed { errors: usize, warnings: usize },
}

/// Commit message input errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommitError {
    #[error("Empty commit message")]
    EmptyMessage,
}

/// Result type alias for cklint operations.
pub type Result<T> = std::result::Result<T, CkError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CkError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
