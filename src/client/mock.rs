//! Mock dashboard implementation for testing.
//!
//! `MockDashboard` implements the [`DashboardApi`] trait, serves canned
//! responses keyed by method and path, and records every call for later
//! assertion. Unregistered paths answer `404 {"detail": "Not Found"}`.
//!
//! # Example
//!
//! ```
//! use procdash::client::{ApiResponse, DashboardApi, MockDashboard};
//! use serde_json::json;
//!
//! let api = MockDashboard::new();
//! api.on_patch("step-runs/7", ApiResponse::new(204, json!(null)));
//!
//! let response = api.patch("step-runs/7", &json!({"status": "success"})).unwrap();
//! assert_eq!(response.status, 204);
//!
//! let call = &api.calls()[0];
//! assert_eq!(call.method, "PATCH");
//! assert_eq!(call.body, Some(json!({"status": "success"})));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::{json, Value};

use crate::error::{DashboardError, Result};

use super::{ApiResponse, DashboardApi};

/// A call captured by [`MockDashboard`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// HTTP method (`GET` or `PATCH`).
    pub method: &'static str,
    /// Request path relative to the base URL.
    pub path: String,
    /// Query parameters in the order given.
    pub query: Vec<(String, String)>,
    /// JSON body for PATCH requests.
    pub body: Option<Value>,
}

impl RecordedCall {
    /// Look up a query parameter by name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Mock transport for testing.
#[derive(Debug, Default)]
pub struct MockDashboard {
    gets: RefCell<HashMap<String, ApiResponse>>,
    patches: RefCell<HashMap<String, ApiResponse>>,
    failing: RefCell<HashMap<String, String>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl MockDashboard {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `GET path` with the given response.
    pub fn on_get(&self, path: &str, response: ApiResponse) {
        self.gets.borrow_mut().insert(path.to_string(), response);
    }

    /// Respond to `PATCH path` with the given response.
    pub fn on_patch(&self, path: &str, response: ApiResponse) {
        self.patches.borrow_mut().insert(path.to_string(), response);
    }

    /// Make any request to `path` fail as if the transport broke.
    pub fn fail_on(&self, path: &str, message: &str) {
        self.failing
            .borrow_mut()
            .insert(path.to_string(), message.to_string());
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Paths requested so far, in order.
    pub fn paths(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.path.clone()).collect()
    }

    fn record(
        &self,
        method: &'static str,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) {
        self.calls.borrow_mut().push(RecordedCall {
            method,
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.cloned(),
        });
    }

    fn respond(
        &self,
        table: &RefCell<HashMap<String, ApiResponse>>,
        path: &str,
    ) -> Result<ApiResponse> {
        if let Some(message) = self.failing.borrow().get(path) {
            return Err(DashboardError::Other(anyhow::anyhow!(message.clone())));
        }
        Ok(table
            .borrow()
            .get(path)
            .cloned()
            .unwrap_or_else(|| ApiResponse::new(404, json!({"detail": "Not Found"}))))
    }
}

impl DashboardApi for MockDashboard {
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse> {
        self.record("GET", path, query, None);
        self.respond(&self.gets, path)
    }

    fn patch(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        self.record("PATCH", path, &[], Some(body));
        self.respond(&self.patches, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_path_returns_404() {
        let api = MockDashboard::new();
        let response = api.get("processes/", &[]).unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(response.body["detail"], "Not Found");
    }

    #[test]
    fn records_query_parameters() {
        let api = MockDashboard::new();
        api.get("runs/", &[("process_id", "3"), ("meta_filter", "cpr:123")])
            .unwrap();

        let call = &api.calls()[0];
        assert_eq!(call.method, "GET");
        assert_eq!(call.query_param("process_id"), Some("3"));
        assert_eq!(call.query_param("meta_filter"), Some("cpr:123"));
        assert_eq!(call.query_param("missing"), None);
    }

    #[test]
    fn get_and_patch_are_keyed_separately() {
        let api = MockDashboard::new();
        api.on_get("step-runs/1", ApiResponse::ok(json!({"id": 1})));
        api.on_patch("step-runs/1", ApiResponse::new(202, json!({"ok": true})));

        assert_eq!(api.get("step-runs/1", &[]).unwrap().status, 200);
        assert_eq!(api.patch("step-runs/1", &json!({})).unwrap().status, 202);
    }

    #[test]
    fn fail_on_returns_error_and_still_records() {
        let api = MockDashboard::new();
        api.fail_on("processes/", "connection refused");

        let err = api.get("processes/", &[]).unwrap_err();
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(api.paths(), vec!["processes/".to_string()]);
    }
}
