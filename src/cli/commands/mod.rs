//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands that
//! talk to the dashboard are generic over [`DashboardApi`](crate::client::DashboardApi)
//! so they can run against [`MockDashboard`](crate::client::MockDashboard) in tests.

pub mod dispatcher;
pub mod payload;
pub mod report;
pub mod resolve;
pub mod update;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
