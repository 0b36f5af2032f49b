//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::client::HttpDashboardClient;
use crate::config::load_config;
use crate::error::Result;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, writing user-facing output to `out`.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Map a dashboard HTTP status to a result.
    pub fn from_http_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            Self::success()
        } else {
            Self::failure(1)
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config_path: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a dispatcher that reads configuration from `config_path`
    /// (or the default locations when `None`).
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }

    /// Get the explicit config path, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    fn client(&self) -> Result<HttpDashboardClient> {
        let config = load_config(self.config_path())?;
        HttpDashboardClient::from_config(&config)
    }

    /// Dispatch and execute a command.
    ///
    /// Commands that talk to the dashboard get an HTTP client built from the
    /// resolved configuration; `payload` runs offline.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        match &cli.command {
            Commands::Resolve(args) => {
                let cmd = super::resolve::ResolveCommand::new(self.client()?, args.clone());
                cmd.execute(out)
            }
            Commands::Update(args) => {
                let cmd = super::update::UpdateCommand::new(self.client()?, args.clone());
                cmd.execute(out)
            }
            Commands::Report(args) => {
                let cmd = super::report::ReportCommand::new(self.client()?, args.clone());
                cmd.execute(out)
            }
            Commands::Payload(args) => {
                let cmd = super::payload::PayloadCommand::new(args.clone());
                cmd.execute(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(2);
        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn http_status_mapping() {
        assert_eq!(CommandResult::from_http_status(204), CommandResult::success());
        assert_eq!(CommandResult::from_http_status(404), CommandResult::failure(1));
    }

    #[test]
    fn payload_dispatches_without_config() {
        let temp = TempDir::new().unwrap();
        let dispatcher = CommandDispatcher::new(Some(temp.path().join("missing.yml")));
        let cli = Cli::parse_from(["procdash", "payload", "--status", "success"]);

        let mut out = Vec::new();
        let result = dispatcher.dispatch(&cli, &mut out).unwrap();

        assert!(result.success);
        assert!(String::from_utf8(out).unwrap().contains("\"status\": \"success\""));
    }

    #[test]
    fn network_commands_need_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yml");
        let dispatcher = CommandDispatcher::new(Some(path));
        let cli = Cli::parse_from(["procdash", "resolve", "P", "S", "C"]);

        let mut out = Vec::new();
        let err = dispatcher.dispatch(&cli, &mut out).unwrap_err();
        assert!(matches!(err, crate::DashboardError::ConfigNotFound { .. }));
    }

    #[test]
    fn config_path_is_exposed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dash.yml");
        fs::write(&path, "base_url: http://localhost:9\n").unwrap();

        let dispatcher = CommandDispatcher::new(Some(path.clone()));
        assert_eq!(dispatcher.config_path(), Some(path.as_path()));
    }
}
