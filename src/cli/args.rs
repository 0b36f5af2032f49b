//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::failure::{BusinessFailure, StepFailure};
use crate::step_run::StepRunStatus;

/// procdash - Report step-run outcomes to the Process Dashboard.
#[derive(Debug, Parser)]
#[command(name = "procdash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ~/.procdash/config.yml)
    #[arg(short, long, global = true, env = "PROCDASH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve the step-run ID for a process, step and case
    Resolve(ResolveArgs),

    /// Send a status update for a known step-run ID
    Update(UpdateArgs),

    /// Resolve a step run and send a status update in one go
    Report(ReportArgs),

    /// Print the update payload without sending it
    Payload(PayloadArgs),
}

/// Identifies a step run by human-readable names.
#[derive(Debug, Clone, clap::Args)]
pub struct StepRunTarget {
    /// Process name as registered in the dashboard
    pub process: String,

    /// Step name within the process
    pub step: String,

    /// Case number (CPR) identifying the run
    pub case: String,
}

/// Failure to attach to an update.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FailureArgs {
    /// Business error code (reported as-is)
    #[arg(long, requires = "error_message", conflicts_with = "unexpected")]
    pub error_code: Option<String>,

    /// Business error message
    #[arg(long, requires = "error_code")]
    pub error_message: Option<String>,

    /// Business error details (e.g. a trace)
    #[arg(long, requires = "error_code")]
    pub error_details: Option<String>,

    /// Unexpected error; its text is not sent to the dashboard
    #[arg(long, value_name = "MESSAGE")]
    pub unexpected: Option<String>,
}

impl FailureArgs {
    /// Build the failure described by the flags, if any.
    pub fn to_failure(&self) -> Option<StepFailure> {
        if let (Some(code), Some(message)) = (&self.error_code, &self.error_message) {
            let mut failure = BusinessFailure::new(code.as_str(), message.as_str());
            if let Some(details) = &self.error_details {
                failure = failure.with_trace(details.as_str());
            }
            return Some(StepFailure::Business(failure));
        }

        self.unexpected
            .as_ref()
            .map(|message| StepFailure::unexpected(anyhow::anyhow!(message.clone())))
    }
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub target: StepRunTarget,
}

/// Arguments for the `update` command.
#[derive(Debug, Clone, clap::Args)]
pub struct UpdateArgs {
    /// Step-run ID to update
    pub step_run_id: i64,

    /// New status
    #[arg(short, long)]
    pub status: StepRunStatus,

    #[command(flatten)]
    pub failure: FailureArgs,
}

/// Arguments for the `report` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub target: StepRunTarget,

    /// New status
    #[arg(short, long)]
    pub status: StepRunStatus,

    #[command(flatten)]
    pub failure: FailureArgs,
}

/// Arguments for the `payload` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PayloadArgs {
    /// Status to put in the payload
    #[arg(short, long)]
    pub status: StepRunStatus,

    #[command(flatten)]
    pub failure: FailureArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resolve() {
        let cli = Cli::parse_from(["procdash", "resolve", "Tilskud", "Opslag", "0101901234"]);
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.target.process, "Tilskud");
                assert_eq!(args.target.step, "Opslag");
                assert_eq!(args.target.case, "0101901234");
            }
            other => panic!("Expected Resolve command, got {:?}", other),
        }
    }

    #[test]
    fn parses_update_with_business_failure() {
        let cli = Cli::parse_from([
            "procdash",
            "update",
            "42",
            "--status",
            "failed",
            "--error-code",
            "CprNotFound",
            "--error-message",
            "CPR mangler",
        ]);
        let Commands::Update(args) = cli.command else {
            panic!("Expected Update command");
        };
        assert_eq!(args.step_run_id, 42);
        assert_eq!(args.status, StepRunStatus::Failed);
        assert!(args.failure.to_failure().unwrap().is_business());
    }

    #[test]
    fn parses_report_with_unexpected_failure() {
        let cli = Cli::parse_from([
            "procdash",
            "report",
            "Tilskud",
            "Opslag",
            "0101901234",
            "-s",
            "failed",
            "--unexpected",
            "timeout",
        ]);
        let Commands::Report(args) = cli.command else {
            panic!("Expected Report command");
        };
        let failure = args.failure.to_failure().unwrap();
        assert!(!failure.is_business());
    }

    #[test]
    fn no_failure_flags_means_no_failure() {
        assert!(FailureArgs::default().to_failure().is_none());
    }

    #[test]
    fn error_code_requires_message() {
        let result = Cli::try_parse_from([
            "procdash",
            "payload",
            "--status",
            "failed",
            "--error-code",
            "X",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn business_and_unexpected_conflict() {
        let result = Cli::try_parse_from([
            "procdash",
            "payload",
            "--status",
            "failed",
            "--error-code",
            "X",
            "--error-message",
            "boom",
            "--unexpected",
            "oops",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_empty_status() {
        let result = Cli::try_parse_from(["procdash", "payload", "--status", ""]);
        assert!(result.is_err());
    }

    #[test]
    fn status_is_case_insensitive() {
        let cli = Cli::parse_from(["procdash", "payload", "--status", "Success"]);
        let Commands::Payload(args) = cli.command else {
            panic!("Expected Payload command");
        };
        assert_eq!(args.status, StepRunStatus::Success);
    }

    #[test]
    fn unlisted_status_passes_through() {
        let cli = Cli::parse_from(["procdash", "update", "3", "--status", "skipped"]);
        let Commands::Update(args) = cli.command else {
            panic!("Expected Update command");
        };
        assert_eq!(args.status, StepRunStatus::Other("skipped".to_string()));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "procdash",
            "payload",
            "--status",
            "success",
            "--debug",
            "--config",
            "/tmp/dash.yml",
        ]);
        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/dash.yml")));
    }
}
