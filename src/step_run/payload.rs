//! Step-run update payloads.
//!
//! An update records "this happened at T": `started_at` and `finished_at`
//! are both set to the same instant, and a failure is reported according
//! to its classification in [`StepFailure`].
//!
//! # Example
//!
//! ```
//! use procdash::step_run::{build_step_run_update, StepRunStatus};
//!
//! let update = build_step_run_update(StepRunStatus::Success, None);
//! assert_eq!(update.started_at, update.finished_at);
//! assert!(update.started_at.ends_with('Z'));
//! assert!(update.failure.is_none());
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::failure::StepFailure;

/// Error code reported for failures that are not business errors.
pub const APPLICATION_ERROR_CODE: &str = "ApplicationException";

/// Message reported for failures that are not business errors.
pub const APPLICATION_ERROR_MESSAGE: &str = "Processen er fejlet";

/// Details reported for failures that are not business errors.
pub const APPLICATION_ERROR_DETAILS: &str = "Digitalisering undersøger fejlen og genstarter processen.\n\nKontakt Digitalisering hvis det ikke er løst efter 2 arbejdsdage.";

/// Status of a step run.
///
/// The dashboard's common statuses have their own variants; any other
/// status it knows (e.g. a skipped state) travels as [`StepRunStatus::Other`].
/// Known statuses serialize lowercase; `Other` is sent as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StepRunStatus {
    /// Not started yet.
    Pending,
    /// Currently executing.
    Running,
    /// Completed successfully.
    Success,
    /// Completed with a failure.
    Failed,
    /// Any other dashboard status, by wire name.
    Other(String),
}

impl StepRunStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Other(name) => name.as_str(),
        }
    }

    /// Map a wire name to a status; unknown names become [`StepRunStatus::Other`].
    fn from_wire(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "running" => Self::Running,
            "success" => Self::Success,
            "failed" => Self::Failed,
            _ => Self::Other(name.to_string()),
        }
    }
}

impl fmt::Display for StepRunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a status case-insensitively; this is also the CLI's parser.
impl FromStr for StepRunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err("step-run status must not be empty".to_string());
        }
        Ok(Self::from_wire(name))
    }
}

impl From<String> for StepRunStatus {
    fn from(name: String) -> Self {
        Self::from_wire(name.trim())
    }
}

impl From<StepRunStatus> for String {
    fn from(status: StepRunStatus) -> Self {
        match status {
            StepRunStatus::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Failure details sent with an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureInfo {
    /// Failure code.
    pub error_code: String,
    /// Human readable message.
    pub message: String,
    /// Extra detail; `null` when there is none.
    pub details: Option<String>,
}

impl FailureInfo {
    /// Report for a failure, redacting anything that is not a business error.
    pub fn from_failure(failure: &StepFailure) -> Self {
        match failure {
            StepFailure::Business(business) => Self {
                error_code: business.code.clone(),
                message: business.message.clone(),
                details: business.trace.clone(),
            },
            StepFailure::Unexpected(_) => Self::application_error(),
        }
    }

    /// The generic report used in place of unexpected errors.
    pub fn application_error() -> Self {
        Self {
            error_code: APPLICATION_ERROR_CODE.to_string(),
            message: APPLICATION_ERROR_MESSAGE.to_string(),
            details: Some(APPLICATION_ERROR_DETAILS.to_string()),
        }
    }
}

/// Body of `PATCH step-runs/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRunUpdate {
    /// New status.
    pub status: StepRunStatus,
    /// Update instant (ISO-8601 UTC, milliseconds, `Z`).
    pub started_at: String,
    /// Same instant as `started_at`.
    pub finished_at: String,
    /// Failure report; serialized as `null` when absent.
    pub failure: Option<FailureInfo>,
}

/// Format an instant as ISO-8601 UTC with millisecond precision and `Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build an update stamped with the current time.
pub fn build_step_run_update(status: StepRunStatus, failure: Option<&StepFailure>) -> StepRunUpdate {
    build_step_run_update_at(status, failure, Utc::now())
}

/// Build an update stamped with `now`.
pub fn build_step_run_update_at(
    status: StepRunStatus,
    failure: Option<&StepFailure>,
    now: DateTime<Utc>,
) -> StepRunUpdate {
    let timestamp = format_timestamp(now);

    StepRunUpdate {
        status,
        started_at: timestamp.clone(),
        finished_at: timestamp,
        failure: failure.map(FailureInfo::from_failure),
    }
}
