//! One-stop reporting of step outcomes.

use serde_json::Value;
use tracing::Dispatch;

use crate::client::DashboardApi;
use crate::error::Result;
use crate::failure::StepFailure;
use crate::lookup::{DashboardLookup, IdentityLookup};

use super::payload::{build_step_run_update, StepRunStatus, StepRunUpdate};
use super::resolver::resolve_step_run_id;
use super::updater::update_step_run;

/// Outcome of [`StepRunService::report`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    /// Step run that was updated.
    pub step_run_id: i64,
    /// Payload that was sent.
    pub update: StepRunUpdate,
    /// Response body from the dashboard.
    pub body: Value,
    /// Raw HTTP status from the dashboard.
    pub status: u16,
}

impl ReportOutcome {
    /// Whether the dashboard answered with a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Resolves and updates step runs against one dashboard.
///
/// Log events are emitted through the [`Dispatch`] the service was built
/// with, so the caller decides where they go and for how long.
///
/// # Example
///
/// ```
/// use procdash::client::{ApiResponse, MockDashboard};
/// use procdash::lookup::IdentityLookup;
/// use procdash::step_run::{StepRunService, StepRunStatus};
/// use serde_json::json;
///
/// struct Known;
///
/// impl IdentityLookup for Known {
///     fn process_id(&self, _: &str) -> procdash::Result<i64> { Ok(1) }
///     fn step_id(&self, _: i64, _: &str) -> procdash::Result<i64> { Ok(2) }
///     fn run_id(&self, _: i64, _: &str) -> procdash::Result<i64> { Ok(3) }
/// }
///
/// let api = MockDashboard::new();
/// api.on_get("step-runs/run/3/step/2", ApiResponse::ok(json!({"id": 7})));
/// api.on_patch("step-runs/7", ApiResponse::ok(json!({"id": 7, "status": "success"})));
///
/// let service = StepRunService::with_lookup(&api, Known)
///     .with_dispatch(tracing::Dispatch::none());
/// let outcome = service
///     .report("Tilskud", "Journalisering", "0101901234", StepRunStatus::Success, None)
///     .unwrap();
///
/// assert_eq!(outcome.step_run_id, 7);
/// assert!(outcome.is_success());
/// ```
pub struct StepRunService<A, L> {
    api: A,
    lookup: L,
    dispatch: Dispatch,
}

impl<A: DashboardApi + Clone> StepRunService<A, DashboardLookup<A>> {
    /// Create a service that resolves identities over the same transport.
    pub fn new(api: A) -> Self {
        let lookup = DashboardLookup::new(api.clone());
        Self::with_lookup(api, lookup)
    }
}

impl<A: DashboardApi, L: IdentityLookup> StepRunService<A, L> {
    /// Create a service with an explicit identity lookup.
    ///
    /// Logs go to the dispatcher that is current at construction time.
    pub fn with_lookup(api: A, lookup: L) -> Self {
        Self {
            api,
            lookup,
            dispatch: tracing::dispatcher::get_default(Dispatch::clone),
        }
    }

    /// Route this service's log events to `dispatch`.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Get the transport.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Get the identity lookup.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// See [`resolve_step_run_id`].
    pub fn resolve_step_run_id(
        &self,
        process_name: &str,
        step_name: &str,
        case_number: &str,
    ) -> Result<i64> {
        tracing::dispatcher::with_default(&self.dispatch, || {
            resolve_step_run_id(&self.api, &self.lookup, process_name, step_name, case_number)
        })
    }

    /// See [`update_step_run`].
    pub fn update_step_run(&self, step_run_id: i64, update: &StepRunUpdate) -> Result<(Value, u16)> {
        tracing::dispatcher::with_default(&self.dispatch, || {
            update_step_run(&self.api, step_run_id, update)
        })
    }

    /// Resolve the step run, build an update stamped now, and send it.
    pub fn report(
        &self,
        process_name: &str,
        step_name: &str,
        case_number: &str,
        status: StepRunStatus,
        failure: Option<&StepFailure>,
    ) -> Result<ReportOutcome> {
        let step_run_id = self.resolve_step_run_id(process_name, step_name, case_number)?;
        let update = build_step_run_update(status, failure);
        let (body, http_status) = self.update_step_run(step_run_id, &update)?;

        Ok(ReportOutcome {
            step_run_id,
            update,
            body,
            status: http_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ApiResponse, MockDashboard};
    use crate::error::DashboardError;
    use crate::failure::BusinessFailure;
    use serde_json::json;

    fn seeded_api() -> MockDashboard {
        let api = MockDashboard::new();
        api.on_get(
            "processes/",
            ApiResponse::ok(json!([{"id": 1, "name": "Tilskud"}])),
        );
        api.on_get(
            "processes/1/steps",
            ApiResponse::ok(json!([{"id": 10, "name": "Journalisering"}])),
        );
        api.on_get("runs/", ApiResponse::ok(json!([{"id": 100}])));
        api.on_get("step-runs/run/100/step/10", ApiResponse::ok(json!({"id": 1000})));
        api
    }

    #[test]
    fn report_runs_full_chain() {
        let api = seeded_api();
        api.on_patch("step-runs/1000", ApiResponse::ok(json!({"id": 1000, "status": "failed"})));

        let failure = StepFailure::Business(BusinessFailure::new("CprNotFound", "CPR mangler"));
        let outcome = StepRunService::new(&api)
            .report("Tilskud", "Journalisering", "0101901234", StepRunStatus::Failed, Some(&failure))
            .unwrap();

        assert_eq!(outcome.step_run_id, 1000);
        assert_eq!(outcome.status, 200);
        assert_eq!(outcome.update.failure.as_ref().unwrap().error_code, "CprNotFound");
        assert_eq!(
            api.paths(),
            vec![
                "processes/",
                "processes/1/steps",
                "runs/",
                "step-runs/run/100/step/10",
                "step-runs/1000",
            ]
        );
    }

    #[test]
    fn report_does_not_patch_when_lookup_fails() {
        let api = seeded_api();
        api.on_get("runs/", ApiResponse::ok(json!([])));

        let err = StepRunService::new(&api)
            .report("Tilskud", "Journalisering", "0101901234", StepRunStatus::Success, None)
            .unwrap_err();

        assert!(matches!(err, DashboardError::NotFound { entity: "Run", .. }));
        assert!(api.calls().iter().all(|c| c.method == "GET"));
    }

    #[test]
    fn report_surfaces_non_success_status() {
        let api = seeded_api();
        api.on_patch("step-runs/1000", ApiResponse::new(500, json!({"detail": "oops"})));

        let outcome = StepRunService::new(&api)
            .report("Tilskud", "Journalisering", "0101901234", StepRunStatus::Success, None)
            .unwrap();

        assert!(!outcome.is_success());
        assert_eq!(outcome.body["detail"], "oops");
    }

    #[test]
    fn resolves_with_silent_dispatch() {
        let api = seeded_api();
        let service = StepRunService::new(&api).with_dispatch(Dispatch::none());

        assert_eq!(
            service
                .resolve_step_run_id("Tilskud", "Journalisering", "0101901234")
                .unwrap(),
            1000
        );
    }
}
