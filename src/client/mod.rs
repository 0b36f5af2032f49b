//! Transport seam for the Process Dashboard API.
//!
//! Everything in this crate talks to the dashboard through the
//! [`DashboardApi`] trait, so the transport can be swapped:
//!
//! - [`HttpDashboardClient`] - blocking `reqwest` client used in production
//! - [`MockDashboard`] - canned responses with call recording, for tests
//!
//! # Example
//!
//! ```
//! use procdash::client::{ApiResponse, DashboardApi, MockDashboard};
//! use serde_json::json;
//!
//! let api = MockDashboard::new();
//! api.on_get("step-runs/42", ApiResponse::ok(json!({"id": 42})));
//!
//! let response = api.get("step-runs/42", &[]).unwrap();
//! assert_eq!(response.body["id"], 42);
//! assert_eq!(api.calls().len(), 1);
//! ```

pub mod http;
pub mod mock;

pub use http::HttpDashboardClient;
pub use mock::{MockDashboard, RecordedCall};

use serde_json::Value;

use crate::error::Result;

/// Parsed response from the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Raw HTTP status code.
    pub status: u16,
    /// Parsed JSON body (`Null` for an empty body).
    pub body: Value,
}

impl ApiResponse {
    /// Create a response with an explicit status.
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Create a 200 response.
    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal HTTP surface the dashboard helpers need.
///
/// Paths are relative to the dashboard base URL (e.g. `step-runs/12`).
/// Implementations own base URL, authentication and timeouts. Non-2xx
/// statuses are returned as responses, not errors.
pub trait DashboardApi {
    /// Issue a GET with the given query parameters.
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse>;

    /// Issue a PATCH with a JSON body.
    fn patch(&self, path: &str, body: &Value) -> Result<ApiResponse>;
}

impl<T: DashboardApi + ?Sized> DashboardApi for &T {
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse> {
        (**self).get(path, query)
    }

    fn patch(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        (**self).patch(path, body)
    }
}

impl<T: DashboardApi + ?Sized> DashboardApi for Box<T> {
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse> {
        (**self).get(path, query)
    }

    fn patch(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        (**self).patch(path, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_response_is_success() {
        let response = ApiResponse::ok(json!({}));
        assert_eq!(response.status, 200);
        assert!(response.is_success());
    }

    #[test]
    fn not_found_response_is_not_success() {
        let response = ApiResponse::new(404, json!({"detail": "Not Found"}));
        assert!(!response.is_success());
    }

    #[test]
    fn boxed_api_delegates() {
        let mock = MockDashboard::new();
        mock.on_get("processes/", ApiResponse::ok(json!([])));
        let boxed: Box<dyn DashboardApi> = Box::new(mock);
        let response = boxed.get("processes/", &[]).unwrap();
        assert_eq!(response.body, json!([]));
    }
}
