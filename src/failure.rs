//! Classification of step failures.
//!
//! A step can fail in two ways, and the dashboard treats them differently:
//!
//! - [`StepFailure::Business`] - an expected, classified domain failure
//!   (e.g. a case that does not meet the criteria). Its code, message and
//!   trace are reported to the dashboard as-is.
//! - [`StepFailure::Unexpected`] - anything else. Its detail is never sent;
//!   the dashboard gets a generic message instead.
//!
//! # Example
//!
//! ```
//! use procdash::failure::{BusinessError, StepFailure};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("Borgeren har ikke et aktivt forløb")]
//! struct NoActiveCase;
//!
//! impl BusinessError for NoActiveCase {
//!     fn code(&self) -> &str {
//!         "NoActiveCase"
//!     }
//! }
//!
//! let failure = StepFailure::business(&NoActiveCase);
//! assert!(failure.is_business());
//!
//! let failure = StepFailure::unexpected(anyhow::anyhow!("db timeout"));
//! assert!(!failure.is_business());
//! ```

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;

/// Capability marking an error type as an expected business failure.
pub trait BusinessError: std::error::Error {
    /// Stable code identifying the failure kind, usually the type name.
    fn code(&self) -> &str;

    /// Formatted trace of where the failure originated, if known.
    fn trace(&self) -> Option<String> {
        None
    }
}

/// A classified business failure ready to be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessFailure {
    /// Failure code (e.g. `CprNotFound`).
    pub code: String,
    /// Human readable description.
    pub message: String,
    /// Formatted trace of the origin.
    pub trace: Option<String>,
}

impl BusinessFailure {
    /// Create a failure without a trace.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            trace: None,
        }
    }

    /// Attach a formatted trace.
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Create a failure and capture the current backtrace.
    ///
    /// The trace is only kept when backtraces are enabled
    /// (`RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`).
    pub fn capture(code: impl Into<String>, message: impl Into<String>) -> Self {
        let backtrace = Backtrace::capture();
        let mut failure = Self::new(code, message);
        if backtrace.status() == BacktraceStatus::Captured {
            failure.trace = Some(backtrace.to_string());
        }
        failure
    }

    /// Classify a domain error.
    pub fn from_error<E: BusinessError + ?Sized>(err: &E) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            trace: err.trace(),
        }
    }
}

impl fmt::Display for BusinessFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Outcome attached to a failed step run.
#[derive(Debug)]
pub enum StepFailure {
    /// Expected domain failure; reported in full.
    Business(BusinessFailure),
    /// Unanticipated fault; redacted before reporting.
    Unexpected(anyhow::Error),
}

impl StepFailure {
    /// Classify a domain error as a business failure.
    pub fn business<E: BusinessError + ?Sized>(err: &E) -> Self {
        Self::Business(BusinessFailure::from_error(err))
    }

    /// Wrap any other error as an unexpected failure.
    pub fn unexpected(err: impl Into<anyhow::Error>) -> Self {
        Self::Unexpected(err.into())
    }

    /// Whether this is a business failure.
    pub fn is_business(&self) -> bool {
        matches!(self, Self::Business(_))
    }
}

impl From<BusinessFailure> for StepFailure {
    fn from(failure: BusinessFailure) -> Self {
        Self::Business(failure)
    }
}

impl From<anyhow::Error> for StepFailure {
    fn from(err: anyhow::Error) -> Self {
        Self::Unexpected(err)
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Business(failure) => write!(f, "business failure {}", failure),
            Self::Unexpected(err) => write!(f, "unexpected failure: {}", err),
        }
    }
}
