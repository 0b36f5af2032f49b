//! Sending step-run updates.

use serde_json::Value;

use crate::client::DashboardApi;
use crate::error::Result;

use super::payload::StepRunUpdate;

/// PATCH `step-runs/{step_run_id}` with `update`.
///
/// Returns the parsed response body and raw status code as the dashboard
/// sent them; the caller decides what a status means.
pub fn update_step_run<A>(api: &A, step_run_id: i64, update: &StepRunUpdate) -> Result<(Value, u16)>
where
    A: DashboardApi + ?Sized,
{
    tracing::info!("Updating step run ID {}", step_run_id);

    let body = serde_json::to_value(update).map_err(anyhow::Error::from)?;
    let response = api.patch(&format!("step-runs/{}", step_run_id), &body)?;

    tracing::debug!(step_run_id, status = response.status, "Step run update sent");
    Ok((response.body, response.status))
}
