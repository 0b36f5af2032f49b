//! Command-line interface for procdash.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    Cli, Commands, FailureArgs, PayloadArgs, ReportArgs, ResolveArgs, StepRunTarget, UpdateArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
