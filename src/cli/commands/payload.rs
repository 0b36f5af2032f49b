//! Payload command implementation.
//!
//! The `procdash payload` command prints the update body that `update`
//! and `report` would send, without contacting the dashboard.

use std::io::Write;

use serde::Serialize;

use crate::cli::args::PayloadArgs;
use crate::error::Result;
use crate::step_run::build_step_run_update;

use super::dispatcher::{Command, CommandResult};

/// The payload command implementation.
pub struct PayloadCommand {
    args: PayloadArgs,
}

impl PayloadCommand {
    /// Create a new payload command.
    pub fn new(args: PayloadArgs) -> Self {
        Self { args }
    }
}

impl Command for PayloadCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let failure = self.args.failure.to_failure();
        let update = build_step_run_update(self.args.status.clone(), failure.as_ref());

        write_json(out, &update)?;
        Ok(CommandResult::success())
    }
}

/// Pretty-print `value` as JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(anyhow::Error::from)?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::FailureArgs;
    use crate::step_run::StepRunStatus;
    use serde_json::Value;

    fn run(args: PayloadArgs) -> Value {
        let mut out = Vec::new();
        PayloadCommand::new(args).execute(&mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn prints_success_payload() {
        let payload = run(PayloadArgs {
            status: StepRunStatus::Success,
            failure: FailureArgs::default(),
        });

        assert_eq!(payload["status"], "success");
        assert_eq!(payload["started_at"], payload["finished_at"]);
        assert!(payload["failure"].is_null());
    }

    #[test]
    fn prints_business_failure_with_details() {
        let payload = run(PayloadArgs {
            status: StepRunStatus::Failed,
            failure: FailureArgs {
                error_code: Some("X".into()),
                error_message: Some("boom".into()),
                error_details: Some("frame 0".into()),
                unexpected: None,
            },
        });

        assert_eq!(payload["failure"]["error_code"], "X");
        assert_eq!(payload["failure"]["message"], "boom");
        assert_eq!(payload["failure"]["details"], "frame 0");
    }
}
