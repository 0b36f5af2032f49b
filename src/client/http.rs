//! Blocking HTTP transport for the dashboard.
//!
//! Joins request paths onto the configured base URL, attaches the auth
//! header to every request and parses response bodies as JSON.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;
use serde_json::Value;

use crate::config::{AuthHeader, DashboardConfig};
use crate::error::{DashboardError, Result};

use super::{ApiResponse, DashboardApi};

/// Talks to the Process Dashboard over HTTP/HTTPS.
pub struct HttpDashboardClient {
    client: Client,
    base_url: Url,
    auth: Option<AuthHeader>,
    timeout: Duration,
}

impl HttpDashboardClient {
    /// Create a client for the given base URL with default 30-second timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_options(base_url, None, Duration::from_secs(30))
    }

    /// Create a client from resolved configuration.
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        Self::with_options(base_url, config.auth(), config.timeout())
    }

    /// Create a client with explicit auth and timeout.
    pub fn with_options(
        base_url: &str,
        auth: Option<AuthHeader>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("procdash/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            auth,
            timeout,
        })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a relative API path against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| DashboardError::ConfigValidation {
                message: format!("cannot join '{}' onto {}: {}", path, self.base_url, e),
            })
    }

    fn send(&self, path: &str, request: RequestBuilder) -> Result<ApiResponse> {
        let request = match &self.auth {
            Some(auth) => request.header(&auth.header_name, &auth.header_value),
            None => request,
        };

        let response = request.send()?;
        let status = response.status().as_u16();
        let text = response.text()?;

        tracing::debug!("{} answered HTTP {}", path, status);

        Ok(ApiResponse::new(status, parse_body(path, &text)?))
    }
}

impl DashboardApi for HttpDashboardClient {
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse> {
        let mut url = self.endpoint(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().copied());
        }
        self.send(path, self.client.get(url))
    }

    fn patch(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        let url = self.endpoint(path)?;
        self.send(path, self.client.patch(url).json(body))
    }
}

/// Parse and normalize a base URL so relative joins keep its path.
fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    Url::parse(&normalized).map_err(|e| DashboardError::ConfigValidation {
        message: format!("invalid base URL '{}': {}", raw, e),
    })
}

fn parse_body(path: &str, text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| DashboardError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}
