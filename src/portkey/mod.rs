//! Client for the Portkey admin and prompt-management REST API.
//!
//! [`PortkeyClient`] owns the HTTP connection pool, credentials and timeout.
//! Each REST resource family is exposed as a lightweight borrowed view
//! (`client.users()`, `client.prompts()`, ...) so the tool layer can call
//! `client.workspaces().get(id)` without knowing any endpoint paths.
//!
//! Response payloads are passed through as [`serde_json::Value`]: their shape
//! belongs to the upstream API. Request types are strongly typed and double as
//! MCP tool input schemas.

pub mod analytics;
pub mod audit;
pub mod collections;
pub mod configs;
pub mod fetch;
pub mod guardrails;
pub mod integrations;
pub mod keys;
pub mod labels;
pub mod limits;
pub mod logs;
pub mod partials;
pub mod prompts;
pub mod providers;
pub mod traces;
pub mod users;
pub mod workspaces;

use std::borrow::Cow;
use std::time::{Duration, Instant};

use reqwest::{header, Method, Url};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::config::ApiConfig;

const API_KEY_HEADER: &str = "x-portkey-api-key";

/// Errors from a single upstream call.
///
/// The `Display` output is what MCP clients see after the
/// `Error <verb>ing <resource>:` prefix, so it stays short and human readable.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u128 },

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Invalid(String),
}

impl ClientError {
    /// Upstream HTTP status, when the failure came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Authenticated, timeout-bounded client for the upstream API.
#[derive(Debug, Clone)]
pub struct PortkeyClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    timeout: Duration,
}

impl PortkeyClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn users(&self) -> users::Users<'_> {
        users::Users::new(self)
    }

    pub fn workspaces(&self) -> workspaces::Workspaces<'_> {
        workspaces::Workspaces::new(self)
    }

    pub fn configs(&self) -> configs::Configs<'_> {
        configs::Configs::new(self)
    }

    pub fn keys(&self) -> keys::Keys<'_> {
        keys::Keys::new(self)
    }

    pub fn collections(&self) -> collections::Collections<'_> {
        collections::Collections::new(self)
    }

    pub fn prompts(&self) -> prompts::Prompts<'_> {
        prompts::Prompts::new(self)
    }

    pub fn analytics(&self) -> analytics::Analytics<'_> {
        analytics::Analytics::new(self)
    }

    pub fn guardrails(&self) -> guardrails::Guardrails<'_> {
        guardrails::Guardrails::new(self)
    }

    pub fn limits(&self) -> limits::Limits<'_> {
        limits::Limits::new(self)
    }

    pub fn audit(&self) -> audit::Audit<'_> {
        audit::Audit::new(self)
    }

    pub fn labels(&self) -> labels::Labels<'_> {
        labels::Labels::new(self)
    }

    pub fn partials(&self) -> partials::Partials<'_> {
        partials::Partials::new(self)
    }

    pub fn traces(&self) -> traces::Traces<'_> {
        traces::Traces::new(self)
    }

    pub fn logs(&self) -> logs::Logs<'_> {
        logs::Logs::new(self)
    }

    pub fn providers(&self) -> providers::Providers<'_> {
        providers::Providers::new(self)
    }

    pub fn integrations(&self) -> integrations::Integrations<'_> {
        integrations::Integrations::new(self)
    }

    pub(crate) async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let query = fetch::query_pairs(query);
        self.send::<T, ()>(Method::GET, path, &query, None).await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, &[], body).await
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, path, &[], body).await
    }

    pub(crate) async fn delete<T>(&self, path: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        self.send::<T, ()>(Method::DELETE, path, &[], None).await
    }

    async fn send<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request_id = uuid::Uuid::new_v4();
        let url = fetch::build_url(&self.base_url, path, query)?;
        let started = Instant::now();

        tracing::debug!(%request_id, %method, path, url = %url, "HTTP request started");

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let duration_ms = started.elapsed().as_millis() as u64;
                let err = if e.is_timeout() {
                    ClientError::Timeout {
                        timeout_ms: self.timeout.as_millis(),
                    }
                } else {
                    ClientError::Request(e.to_string())
                };
                tracing::error!(%request_id, %method, path, duration_ms, error = %err, "HTTP request error");
                return Err(err);
            }
        };

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout {
                    timeout_ms: self.timeout.as_millis(),
                }
            } else {
                ClientError::Decode(e.to_string())
            }
        })?;
        let duration_ms = started.elapsed().as_millis() as u64;

        if !status.is_success() {
            let message = fetch::error_message(status, &text);
            tracing::error!(
                %request_id,
                %method,
                path,
                status = status.as_u16(),
                duration_ms,
                error = %message,
                "HTTP request failed"
            );
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(%request_id, %method, path, status = status.as_u16(), duration_ms, "HTTP request completed");

        let payload = if text.trim().is_empty() { "{}" } else { text.as_str() };
        serde_json::from_str(payload).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Percent-encode a single path segment (ids and slugs come from tool input).
pub(crate) fn segment(raw: &str) -> Cow<'_, str> {
    urlencoding::encode(raw)
}
