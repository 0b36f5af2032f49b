//! Connection settings for the Process Dashboard.
//!
//! - Schema and accessors in [`schema`]
//! - File discovery, loading and environment overrides in [`loader`]
//! - Auth header construction in [`auth`]
//!
//! # Example
//!
//! ```
//! use procdash::config::{parse_config, DashboardConfig};
//! use std::path::Path;
//!
//! let yaml = "base_url: https://dashboard.example.com/api\napi_key: s3cret\n";
//! let config: DashboardConfig = parse_config(yaml, Path::new("config.yml")).unwrap();
//!
//! assert_eq!(config.base_url().unwrap(), "https://dashboard.example.com/api");
//! assert_eq!(config.auth().unwrap().header_value, "Bearer s3cret");
//! ```
//!
//! # Resolution Order
//!
//! Later sources override earlier ones:
//! 1. Built-in defaults
//! 2. Config file (`--config`, or `~/.procdash/config.yml` if present)
//! 3. `PROCDASH_*` environment variables

pub mod auth;
pub mod loader;
pub mod schema;

pub use auth::{resolve_auth, AuthHeader};
pub use loader::{
    apply_env_overrides, load_config, load_config_file, parse_config, user_config_path,
    ENV_API_KEY, ENV_AUTH_HEADER, ENV_TIMEOUT, ENV_URL,
};
pub use schema::{DashboardConfig, DEFAULT_TIMEOUT_SECS};
