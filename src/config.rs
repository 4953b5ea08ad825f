use std::net::SocketAddr;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

/// Default upstream API root.
pub const DEFAULT_BASE_URL: &str = "https://api.portkey.ai/v1";

/// Default timeout applied to every upstream request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default idle timeout before an HTTP session is evicted (30 minutes).
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Default interval between idle-session sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Errors that can occur while assembling configuration.
///
/// All of these are fatal: the process never starts serving with a bad config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORTKEY_API_KEY environment variable is not set")]
    MissingApiKey,

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid URL protocol: {0}")]
    InvalidUrlScheme(String),

    #[error("Invalid listen address {host}:{port}")]
    InvalidListenAddress { host: String, port: u16 },

    #[error("{name} must be greater than zero")]
    ZeroDuration { name: &'static str },
}

/// Settings for talking to the upstream REST API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: Url,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Build and validate the upstream settings.
    ///
    /// A blank key counts as missing. The base URL falls back to
    /// [`DEFAULT_BASE_URL`] and must use `http` or `https`.
    pub fn new(
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let raw = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = validate_base_url(&raw)?;
        non_zero(timeout, "PORTKEY_TIMEOUT_MS")?;

        Ok(Self {
            api_key,
            base_url,
            timeout,
        })
    }
}

fn non_zero(value: Duration, name: &'static str) -> Result<(), ConfigError> {
    if value.is_zero() {
        return Err(ConfigError::ZeroDuration { name });
    }
    Ok(())
}

/// Parse a base URL and reject anything that is not plain HTTP(S).
pub fn validate_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|_| ConfigError::InvalidBaseUrl(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrlScheme(format!("{other}:"))),
    }
}

/// Settings for the HTTP transport mode.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// Maximum idle gap before a session is swept.
    pub session_timeout: Duration,
    /// How often the idle sweep runs.
    pub sweep_interval: Duration,
}

impl HttpConfig {
    /// Check everything the HTTP mode needs before anything is bound.
    pub fn validate(&self) -> Result<SocketAddr, ConfigError> {
        non_zero(self.session_timeout, "MCP_SESSION_TIMEOUT_MS")?;
        non_zero(self.sweep_interval, "MCP_SWEEP_INTERVAL_MS")?;
        self.socket_addr()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let invalid = || ConfigError::InvalidListenAddress {
            host: self.host.clone(),
            port: self.port,
        };
        let host = if self.host == "localhost" {
            "127.0.0.1"
        } else {
            self.host.as_str()
        };
        let ip: std::net::IpAddr = host.parse().map_err(|_| invalid())?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            session_timeout: DEFAULT_SESSION_TIMEOUT,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}
