//! Report command implementation.
//!
//! The `procdash report` command resolves a step run from process, step and
//! case number, then sends a status update for it.

use std::io::Write;

use crate::cli::args::ReportArgs;
use crate::client::DashboardApi;
use crate::error::Result;
use crate::step_run::StepRunService;

use super::dispatcher::{Command, CommandResult};
use super::payload::write_json;

/// The report command implementation.
pub struct ReportCommand<A> {
    api: A,
    args: ReportArgs,
}

impl<A: DashboardApi> ReportCommand<A> {
    /// Create a new report command.
    pub fn new(api: A, args: ReportArgs) -> Self {
        Self { api, args }
    }
}

impl<A: DashboardApi> Command for ReportCommand<A> {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let target = &self.args.target;
        let failure = self.args.failure.to_failure();

        let outcome = StepRunService::new(&self.api).report(
            &target.process,
            &target.step,
            &target.case,
            self.args.status.clone(),
            failure.as_ref(),
        )?;

        writeln!(out, "Step run {}: HTTP {}", outcome.step_run_id, outcome.status)?;
        write_json(out, &outcome.body)?;
        Ok(CommandResult::from_http_status(outcome.status))
    }
}
