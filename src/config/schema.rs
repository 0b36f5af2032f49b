//! Configuration schema.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

use super::auth::{resolve_auth, AuthHeader};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Dashboard connection settings.
///
/// Every field is optional so partial files and environment layers can be
/// merged with [`DashboardConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Base URL of the dashboard API (e.g. `https://host/api/v1/`).
    #[serde(default)]
    pub base_url: Option<String>,

    /// API key sent with every request.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Header carrying the API key; bearer auth when unset.
    #[serde(default)]
    pub auth_header: Option<String>,

    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl DashboardConfig {
    /// Overlay `other` onto `self`; fields set in `other` win.
    pub fn merge(&mut self, other: DashboardConfig) {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.auth_header.is_some() {
            self.auth_header = other.auth_header;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }

    /// Check values that would make the client unusable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidation` for a zero timeout.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == Some(0) {
            return Err(DashboardError::ConfigValidation {
                message: "timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// The configured base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidation` if no base URL was configured.
    pub fn base_url(&self) -> Result<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| DashboardError::ConfigValidation {
                message: "base_url is not set (use the config file or PROCDASH_URL)".to_string(),
            })
    }

    /// Auth header derived from `api_key` and `auth_header`.
    pub fn auth(&self) -> Option<AuthHeader> {
        resolve_auth(self.api_key.as_deref(), self.auth_header.as_deref())
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_base_url() {
        let config = DashboardConfig::default();
        let err = config.base_url().unwrap_err();
        assert!(matches!(err, DashboardError::ConfigValidation { .. }));
    }

    #[test]
    fn blank_base_url_is_rejected() {
        let config = DashboardConfig {
            base_url: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.base_url().is_err());
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let config = DashboardConfig {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DashboardError::ConfigValidation { .. })
        ));
        assert!(DashboardConfig::default().validate().is_ok());
    }

    #[test]
    fn default_timeout() {
        let config = DashboardConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn merge_overrides_only_set_fields() {
        let mut base = DashboardConfig {
            base_url: Some("https://a.example.com".to_string()),
            api_key: Some("old".to_string()),
            auth_header: None,
            timeout_secs: Some(10),
        };
        base.merge(DashboardConfig {
            api_key: Some("new".to_string()),
            ..Default::default()
        });

        assert_eq!(base.base_url().unwrap(), "https://a.example.com");
        assert_eq!(base.api_key.as_deref(), Some("new"));
        assert_eq!(base.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn auth_uses_custom_header() {
        let config = DashboardConfig {
            api_key: Some("k".to_string()),
            auth_header: Some("X-API-Key".to_string()),
            ..Default::default()
        };
        let auth = config.auth().unwrap();
        assert_eq!(auth.header_name, "X-API-Key");
        assert_eq!(auth.header_value, "k");
    }
}
