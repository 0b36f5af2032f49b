//! Step-run resolution and status updates.
//!
//! The flow is linear:
//!
//! 1. [`resolve_step_run_id`] - process → step → run → step-run ID
//! 2. [`build_step_run_update`] - payload stamped with the current time
//! 3. [`update_step_run`] - PATCH the payload, return body and status
//!
//! [`StepRunService`] bundles the three behind one transport, lookup and
//! log dispatcher.

pub mod payload;
pub mod resolver;
pub mod service;
pub mod updater;

pub use payload::{
    build_step_run_update, build_step_run_update_at, format_timestamp, FailureInfo,
    StepRunStatus, StepRunUpdate, APPLICATION_ERROR_CODE, APPLICATION_ERROR_DETAILS,
    APPLICATION_ERROR_MESSAGE,
};
pub use resolver::resolve_step_run_id;
pub use service::{ReportOutcome, StepRunService};
pub use updater::update_step_run;
