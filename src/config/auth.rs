//! Authentication headers for dashboard requests.

/// Authentication header attached to every dashboard request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthHeader {
    /// Header name (e.g., "Authorization").
    pub header_name: String,
    /// Header value (e.g., "Bearer token123").
    pub header_value: String,
}

impl AuthHeader {
    /// Create a Bearer token auth header.
    pub fn bearer(token: &str) -> Self {
        Self {
            header_name: "Authorization".to_string(),
            header_value: format!("Bearer {}", token),
        }
    }

    /// Create a custom header auth.
    pub fn custom(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            header_name: name.into(),
            header_value: value.into(),
        }
    }
}

/// Build the auth header for an API key.
///
/// Without a header name the key is sent as a bearer token; with one
/// (e.g. `X-API-Key`) it is sent verbatim under that header.
pub fn resolve_auth(api_key: Option<&str>, header: Option<&str>) -> Option<AuthHeader> {
    let key = api_key.filter(|k| !k.is_empty())?;

    match header.filter(|h| !h.is_empty()) {
        Some(name) => Some(AuthHeader::custom(name, key)),
        None => Some(AuthHeader::bearer(key)),
    }
}
