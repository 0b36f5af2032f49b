//! Resolve command implementation.
//!
//! The `procdash resolve` command prints the step-run ID for a process,
//! step and case number.

use std::io::Write;

use crate::cli::args::ResolveArgs;
use crate::client::DashboardApi;
use crate::error::Result;
use crate::step_run::StepRunService;

use super::dispatcher::{Command, CommandResult};

/// The resolve command implementation.
pub struct ResolveCommand<A> {
    api: A,
    args: ResolveArgs,
}

impl<A: DashboardApi> ResolveCommand<A> {
    /// Create a new resolve command.
    pub fn new(api: A, args: ResolveArgs) -> Self {
        Self { api, args }
    }
}

impl<A: DashboardApi> Command for ResolveCommand<A> {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let target = &self.args.target;
        let step_run_id = StepRunService::new(&self.api).resolve_step_run_id(
            &target.process,
            &target.step,
            &target.case,
        )?;

        writeln!(out, "{}", step_run_id)?;
        Ok(CommandResult::success())
    }
}
