//! Update command implementation.
//!
//! The `procdash update` command PATCHes a status update onto a known
//! step-run ID.

use std::io::Write;

use crate::cli::args::UpdateArgs;
use crate::client::DashboardApi;
use crate::error::Result;
use crate::step_run::{build_step_run_update, update_step_run};

use super::dispatcher::{Command, CommandResult};
use super::payload::write_json;

/// The update command implementation.
pub struct UpdateCommand<A> {
    api: A,
    args: UpdateArgs,
}

impl<A: DashboardApi> UpdateCommand<A> {
    /// Create a new update command.
    pub fn new(api: A, args: UpdateArgs) -> Self {
        Self { api, args }
    }
}

impl<A: DashboardApi> Command for UpdateCommand<A> {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let failure = self.args.failure.to_failure();
        let update = build_step_run_update(self.args.status.clone(), failure.as_ref());

        let (body, status) = update_step_run(&self.api, self.args.step_run_id, &update)?;

        writeln!(out, "HTTP {}", status)?;
        write_json(out, &body)?;
        Ok(CommandResult::from_http_status(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::FailureArgs;
    use crate::client::{ApiResponse, MockDashboard};
    use crate::step_run::StepRunStatus;
    use serde_json::json;

    #[test]
    fn sends_update_and_prints_response() {
        let api = MockDashboard::new();
        api.on_patch("step-runs/5", ApiResponse::ok(json!({"id": 5, "status": "success"})));
        let args = UpdateArgs {
            step_run_id: 5,
            status: StepRunStatus::Success,
            failure: FailureArgs::default(),
        };

        let mut out = Vec::new();
        let result = UpdateCommand::new(&api, args).execute(&mut out).unwrap();

        assert!(result.success);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("HTTP 200\n"));
        assert!(printed.contains("\"status\": \"success\""));

        let body = api.calls()[0].body.clone().unwrap();
        assert_eq!(body["status"], "success");
        assert!(body["failure"].is_null());
    }

    #[test]
    fn non_success_status_fails_command() {
        let api = MockDashboard::new();
        let args = UpdateArgs {
            step_run_id: 6,
            status: StepRunStatus::Failed,
            failure: FailureArgs {
                unexpected: Some("db down".into()),
                ..Default::default()
            },
        };

        let mut out = Vec::new();
        let result = UpdateCommand::new(&api, args).execute(&mut out).unwrap();

        assert_eq!(result, CommandResult::failure(1));
        let body = api.calls()[0].body.clone().unwrap();
        assert_eq!(body["failure"]["error_code"], "ApplicationException");
        assert!(!body.to_string().contains("db down"));
    }
}
