//! Resolution of human-readable identifiers into dashboard IDs.
//!
//! The step-run resolver only needs three answers: which process, which
//! step of that process, and which run of that process belongs to a case.
//! [`IdentityLookup`] is that seam; [`DashboardLookup`] answers it over the
//! dashboard API itself.
//!
//! Endpoints used by [`DashboardLookup`]:
//!
//! - `GET processes/?name={process}` - list of processes
//! - `GET processes/{process_id}/steps` - steps of a process
//! - `GET runs/?process_id={id}&meta_filter=cpr:{case}` - runs for a case

use serde_json::Value;

use crate::client::DashboardApi;
use crate::error::{DashboardError, Result};

/// Resolves process, step and run identities.
///
/// Each method either yields an ID or fails with a not-found error.
pub trait IdentityLookup {
    /// Process name → process id.
    fn process_id(&self, process_name: &str) -> Result<i64>;

    /// (process id, step name) → step id.
    fn step_id(&self, process_id: i64, step_name: &str) -> Result<i64>;

    /// (process id, case number) → run id.
    fn run_id(&self, process_id: i64, case_number: &str) -> Result<i64>;
}

impl<T: IdentityLookup + ?Sized> IdentityLookup for &T {
    fn process_id(&self, process_name: &str) -> Result<i64> {
        (**self).process_id(process_name)
    }

    fn step_id(&self, process_id: i64, step_name: &str) -> Result<i64> {
        (**self).step_id(process_id, step_name)
    }

    fn run_id(&self, process_id: i64, case_number: &str) -> Result<i64> {
        (**self).run_id(process_id, case_number)
    }
}

/// [`IdentityLookup`] backed by the dashboard API.
pub struct DashboardLookup<A> {
    api: A,
}

impl<A: DashboardApi> DashboardLookup<A> {
    /// Create a lookup over the given transport.
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Get the underlying transport.
    pub fn api(&self) -> &A {
        &self.api
    }
}

impl<A: DashboardApi> IdentityLookup for DashboardLookup<A> {
    fn process_id(&self, process_name: &str) -> Result<i64> {
        let response = self.api.get("processes/", &[("name", process_name)])?;
        find_by_name(&response.body, process_name)
            .ok_or_else(|| DashboardError::not_found("Process", process_name))
    }

    fn step_id(&self, process_id: i64, step_name: &str) -> Result<i64> {
        let path = format!("processes/{}/steps", process_id);
        let response = self.api.get(&path, &[])?;
        find_by_name(&response.body, step_name).ok_or_else(|| {
            DashboardError::not_found("Step", format!("{} (process {})", step_name, process_id))
        })
    }

    fn run_id(&self, process_id: i64, case_number: &str) -> Result<i64> {
        let process = process_id.to_string();
        let filter = format!("cpr:{}", case_number);
        let response = self.api.get(
            "runs/",
            &[("process_id", process.as_str()), ("meta_filter", filter.as_str())],
        )?;

        items(&response.body)
            .first()
            .and_then(id_of)
            .ok_or_else(|| {
                DashboardError::not_found("Run", format!("{} (process {})", case_number, process_id))
            })
    }
}

/// Integer `id` field of a JSON object.
pub(crate) fn id_of(value: &Value) -> Option<i64> {
    value.get("id").and_then(Value::as_i64)
}

/// Entries of a list response; accepts a bare array or `{"items": [...]}`.
fn items(body: &Value) -> &[Value] {
    match body {
        Value::Array(entries) => entries.as_slice(),
        Value::Object(map) => map
            .get("items")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

fn find_by_name(body: &Value, name: &str) -> Option<i64> {
    items(body)
        .iter()
        .find(|entry| entry.get("name").and_then(Value::as_str) == Some(name))
        .and_then(id_of)
}
