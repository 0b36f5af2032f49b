//! Configuration file discovery and loading.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DashboardError, Result};

use super::schema::DashboardConfig;

/// Overrides `base_url`.
pub const ENV_URL: &str = "PROCDASH_URL";
/// Overrides `api_key`.
pub const ENV_API_KEY: &str = "PROCDASH_API_KEY";
/// Overrides `auth_header`.
pub const ENV_AUTH_HEADER: &str = "PROCDASH_AUTH_HEADER";
/// Overrides `timeout_secs`.
pub const ENV_TIMEOUT: &str = "PROCDASH_TIMEOUT";

/// User's global config at `~/.procdash/config.yml`, if it exists.
pub fn user_config_path() -> Option<PathBuf> {
    let path = dirs::home_dir()?.join(".procdash").join("config.yml");
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParse` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<DashboardConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DashboardError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DashboardError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`DashboardConfig`].
///
/// An empty document yields the default config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<DashboardConfig> {
    if content.trim().is_empty() {
        return Ok(DashboardConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| DashboardError::ConfigParse {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Overlay `PROCDASH_*` variables from `env` onto `config`.
///
/// Variables that are set but blank are ignored.
///
/// # Errors
///
/// Returns `ConfigValidation` if `PROCDASH_TIMEOUT` is not a positive
/// whole number.
pub fn apply_env_overrides(
    config: &mut DashboardConfig,
    env: &HashMap<String, String>,
) -> Result<()> {
    let value = |key: &str| {
        env.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(String::from)
    };

    let mut layer = DashboardConfig {
        base_url: value(ENV_URL),
        api_key: value(ENV_API_KEY),
        auth_header: value(ENV_AUTH_HEADER),
        timeout_secs: None,
    };

    if let Some(raw) = value(ENV_TIMEOUT) {
        let secs = raw
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| DashboardError::ConfigValidation {
                message: format!(
                    "{} must be a positive number of seconds, got '{}'",
                    ENV_TIMEOUT, raw
                ),
            })?;
        layer.timeout_secs = Some(secs);
    }

    config.merge(layer);
    Ok(())
}

/// Resolve the effective configuration.
///
/// Reads `explicit` when given (it must exist), otherwise the user config
/// if present, then applies environment overrides from the process env.
pub fn load_config(explicit: Option<&Path>) -> Result<DashboardConfig> {
    let mut config = DashboardConfig::default();

    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => user_config_path(),
    };

    if let Some(path) = path {
        tracing::debug!("Loading config from {}", path.display());
        config.merge(load_config_file(&path)?);
    }

    let env: HashMap<String, String> = std::env::vars()
        .filter(|(k, _)| k.starts_with("PROCDASH_"))
        .collect();
    apply_env_overrides(&mut config, &env)?;

    config.validate()?;
    Ok(config)
}
