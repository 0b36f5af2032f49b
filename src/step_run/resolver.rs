//! Step-run ID resolution.

use crate::client::DashboardApi;
use crate::error::{DashboardError, Result};
use crate::lookup::{id_of, IdentityLookup};

/// Find the step-run ID for a process, step and case number.
///
/// Resolves the process, step and run through `lookup`, then asks the
/// dashboard for the (non-deleted) step run linking that run and step. The
/// chain stops at the first failure; nothing is retried.
///
/// # Errors
///
/// - `NotFound` if the process, step or run cannot be resolved
/// - `StepRunNotFound` if the response carries no integer `id`
/// - transport errors from `api`, unchanged
pub fn resolve_step_run_id<A, L>(
    api: &A,
    lookup: &L,
    process_name: &str,
    step_name: &str,
    case_number: &str,
) -> Result<i64>
where
    A: DashboardApi + ?Sized,
    L: IdentityLookup + ?Sized,
{
    tracing::info!(
        "Finding step-run ID for {} / {} / {}",
        process_name,
        step_name,
        case_number
    );

    let process_id = lookup.process_id(process_name)?;
    let step_id = lookup.step_id(process_id, step_name)?;
    let run_id = lookup.run_id(process_id, case_number)?;

    let path = format!("step-runs/run/{}/step/{}", run_id, step_id);
    let response = api.get(&path, &[("include_deleted", "false")])?;

    let step_run_id = id_of(&response.body).ok_or_else(|| DashboardError::StepRunNotFound {
        process: process_name.to_string(),
        step: step_name.to_string(),
        case: case_number.to_string(),
    })?;

    tracing::debug!(
        process_id,
        step_id,
        run_id,
        step_run_id,
        "Resolved step run"
    );
    Ok(step_run_id)
}
