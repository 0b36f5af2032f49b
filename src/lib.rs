//! procdash - step-run status reporting for the Process Dashboard.
//!
//! Robots and batch jobs record the outcome of each workflow step in the
//! Process Dashboard. This crate turns human-readable identifiers (process
//! name, step name, case number) into the dashboard's step-run ID and sends
//! the status update for it.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`client`] - Transport trait, HTTP client and test mock
//! - [`config`] - Connection settings from file and environment
//! - [`error`] - Error types and result aliases
//! - [`failure`] - Business vs. unexpected failure classification
//! - [`lookup`] - Process, step and run identity resolution
//! - [`step_run`] - Step-run resolution, payloads and updates
//!
//! # Example
//!
//! ```
//! use procdash::failure::{BusinessFailure, StepFailure};
//! use procdash::step_run::{build_step_run_update, StepRunStatus};
//!
//! let failure = StepFailure::Business(BusinessFailure::new("CprNotFound", "CPR mangler"));
//! let update = build_step_run_update(StepRunStatus::Failed, Some(&failure));
//!
//! let info = update.failure.unwrap();
//! assert_eq!(info.error_code, "CprNotFound");
//! assert_eq!(info.message, "CPR mangler");
//! ```
//!
//! For the HTTP round trip, see the integration tests.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod failure;
pub mod lookup;
pub mod step_run;

pub use error::{DashboardError, Result};
