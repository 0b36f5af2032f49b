//! Error types for dashboard operations.
//!
//! This module defines [`DashboardError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Lookup misses are terminal: they surface as [`DashboardError::NotFound`]
//!   or [`DashboardError::StepRunNotFound`] and are never retried
//! - Transport errors from `reqwest` propagate unchanged via [`DashboardError::Http`]
//! - Use `anyhow::Error` (via `DashboardError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dashboard operations.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A process, step or run could not be resolved.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// No step-run exists for the process/step/case combination.
    #[error("Step run does not exist for process '{process}', step '{step}', case '{case}'")]
    StepRunNotFound {
        process: String,
        step: String,
        case: String,
    },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidation { message: String },

    /// Transport-level HTTP failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON.
    #[error("Invalid JSON response from {path}: {message}")]
    Decode { path: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DashboardError {
    /// Shorthand for a lookup miss.
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// Whether this error is a lookup miss anywhere in the resolution chain.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::StepRunNotFound { .. })
    }
}

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;
