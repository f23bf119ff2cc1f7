//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.
//! Endpoints and credentials for the INSW API are carried here so tools never
//! read global state.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use super::error::{Error, Result};

/// Default commodity detail endpoint (`?hs_code=` is appended per call).
pub const DEFAULT_DETAIL_URL: &str = "https://api.insw.go.id/api-prod-ba/ref/hscode/komoditas";

/// Default commodity search endpoint (`?keyword=&size=&from=` is appended per call).
pub const DEFAULT_SEARCH_URL: &str = "https://api.insw.go.id/api/cms/hscode";

/// Default identifying user agent.
pub const DEFAULT_USER_AGENT: &str = "hscode-cut/1.0";

/// Default `Origin` header expected by the INSW gateway.
pub const DEFAULT_ORIGIN: &str = "https://insw.go.id";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Upstream INSW API endpoints and request settings.
    pub api: ApiConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Upstream commodity API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the "detail by code" endpoint, without query string.
    pub detail_url: String,

    /// Base URL of the "search by keyword" endpoint, without query string.
    pub search_url: String,

    /// Value of the `User-Agent` header.
    pub user_agent: String,

    /// Value of the `Origin` header. Not sent when blank.
    pub origin: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// Configuration for external API credentials.
///
/// Both values are opaque and sent verbatim, even when empty.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Value of the `Authorization` header.
    pub authorization: String,

    /// Value of the `x-insw-key` header.
    pub api_key: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() { "[EMPTY]" } else { "[REDACTED]" }
        }

        f.debug_struct("CredentialsConfig")
            .field("authorization", &redact(&self.authorization))
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            detail_url: DEFAULT_DETAIL_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "hscode".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            api: ApiConfig::default(),
            credentials: CredentialsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_INSW_AUTHORIZATION`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(url) = std::env::var("MCP_INSW_DETAIL_URL") {
            config.api.detail_url = url;
        }

        if let Ok(url) = std::env::var("MCP_INSW_SEARCH_URL") {
            config.api.search_url = url;
        }

        if let Ok(user_agent) = std::env::var("MCP_INSW_USER_AGENT") {
            config.api.user_agent = user_agent;
        }

        if let Ok(origin) = std::env::var("MCP_INSW_ORIGIN") {
            config.api.origin = origin;
        }

        if let Ok(secs) = std::env::var("MCP_INSW_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::config(format!("MCP_INSW_TIMEOUT_SECS must be a whole number, got '{secs}'"))
            })?;
            config.api.timeout = Duration::from_secs(secs);
        }

        if let Ok(authorization) = std::env::var("MCP_INSW_AUTHORIZATION") {
            config.credentials.authorization = authorization;
        }

        if let Ok(api_key) = std::env::var("MCP_INSW_API_KEY") {
            config.credentials.api_key = api_key;
        }

        config.validate()?;
        Ok(config)
    }

    /// Names of credential variables that are unset or blank.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.credentials.authorization.is_empty() {
            missing.push("MCP_INSW_AUTHORIZATION");
        }
        if self.credentials.api_key.is_empty() {
            missing.push("MCP_INSW_API_KEY");
        }
        missing
    }

    /// Log credential status. Call once the subscriber is installed.
    pub fn log_credentials(&self) {
        let missing = self.missing_credentials();

        if !missing.contains(&"MCP_INSW_AUTHORIZATION") {
            info!("INSW authorization credential loaded");
        }

        for var in missing {
            warn!(
                "{var} not set - requests will carry an empty header \
                 and the INSW API may reject them"
            );
        }
    }

    /// Check that endpoints and limits are usable.
    pub fn validate(&self) -> Result<()> {
        validate_endpoint("detail_url", &self.api.detail_url)?;
        validate_endpoint("search_url", &self.api.search_url)?;

        if self.api.timeout.is_zero() {
            return Err(Error::config("api.timeout must be greater than zero"));
        }

        Ok(())
    }
}

fn validate_endpoint(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| Error::config(format!("api.{field} is not a valid URL ({value}): {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::config(format!(
            "api.{field} must use http or https, got '{}'",
            url.scheme()
        )));
    }

    Ok(())
}
