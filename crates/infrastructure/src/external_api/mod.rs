//! Adapters for the upstream REST services
//!
//! - Route registry: base records, listings, live status and metadata
//! - JSONPlaceholder-style directory: users and todos
//!
//! Every adapter goes through [`UpstreamClient`], which owns the shared
//! `reqwest` client and turns transport errors, non-2xx responses and
//! malformed payloads into [`ExternalApiError`].

pub mod routes;
pub mod todos;
pub mod users;

pub use routes::ExternalRouteApiAdapter;
pub use todos::TodoApiAdapter;
pub use users::UserApiAdapter;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use sitemap_application::ApplicationError;
use sitemap_common::UpstreamConfig;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

const CLIENT_USER_AGENT: &str = concat!("sitemap-proxy/", env!("CARGO_PKG_VERSION"));

/// Errors from upstream calls
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExternalApiError {
    /// Connection failed to external service
    #[error("Connection failed to {service}: {message}")]
    ConnectionFailed { service: String, message: String },

    /// Timeout
    #[error("Timeout waiting for {service}")]
    Timeout { service: String },

    /// Non-success status code
    #[error("{service} responded with {status} for {url}")]
    UnexpectedStatus {
        service: String,
        status: u16,
        url: String,
    },

    /// Invalid response from external service
    #[error("Invalid response from {service}: {message}")]
    InvalidResponse { service: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<ExternalApiError> for ApplicationError {
    fn from(err: ExternalApiError) -> Self {
        match &err {
            ExternalApiError::ConfigurationError(message) => {
                ApplicationError::Internal(message.clone())
            }
            ExternalApiError::ConnectionFailed { service, .. }
            | ExternalApiError::Timeout { service }
            | ExternalApiError::UnexpectedStatus { service, .. }
            | ExternalApiError::InvalidResponse { service, .. } => {
                ApplicationError::upstream(service.clone(), err.to_string())
            }
        }
    }
}

/// Result type for upstream calls
pub type ExternalApiResult<T> = Result<T, ExternalApiError>;

/// Build the shared HTTP client with the configured timeouts
pub fn build_http_client(config: &UpstreamConfig) -> ExternalApiResult<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .timeout(Duration::from_secs(config.read_timeout_seconds))
        .default_headers(headers)
        .build()
        .map_err(|e| {
            ExternalApiError::ConfigurationError(format!("Failed to create HTTP client: {}", e))
        })
}

/// JSON-over-HTTP access to one upstream service
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
    service: &'static str,
}

impl UpstreamClient {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        service: &'static str,
    ) -> ExternalApiResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            ExternalApiError::ConfigurationError(format!(
                "Invalid base URL for {}: {} ({})",
                service, base_url, e
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ExternalApiError::ConfigurationError(format!(
                "Base URL for {} cannot carry a path: {}",
                service, base_url
            )));
        }

        Ok(Self {
            http,
            base_url,
            service,
        })
    }

    /// Build an endpoint URL below the base URL; segments are percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> ExternalApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ExternalApiError::ConfigurationError(format!(
                    "Base URL for {} cannot carry a path",
                    self.service
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a JSON document; any non-2xx status is an error
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ExternalApiResult<T> {
        let response = self.send(url.clone()).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(self.unexpected_status(status, &url));
        }
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        self.parse(&body, &url)
    }

    /// GET a JSON document; 404, an empty body or `null` yield `None`
    pub async fn get_optional<T: DeserializeOwned>(&self, url: Url) -> ExternalApiResult<Option<T>> {
        let response = self.send(url.clone()).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(service = self.service, %url, "Upstream resource not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(self.unexpected_status(status, &url));
        }
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        self.parse(&body, &url)
    }

    /// GET a JSON document; only 404 yields `None`, an empty or `null` body is invalid
    pub async fn get_unless_missing<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> ExternalApiResult<Option<T>> {
        let response = self.send(url.clone()).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(service = self.service, %url, "Upstream resource not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(self.unexpected_status(status, &url));
        }
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        if body.trim().is_empty() {
            return Err(self.invalid_response(format!("Empty response body from {}", url)));
        }
        self.parse(&body, &url).map(Some)
    }

    /// Shorthand for an invalid-response error from this service
    pub fn invalid_response(&self, message: impl Into<String>) -> ExternalApiError {
        ExternalApiError::InvalidResponse {
            service: self.service.to_string(),
            message: message.into(),
        }
    }

    async fn send(&self, url: Url) -> ExternalApiResult<reqwest::Response> {
        debug!(service = self.service, %url, "Upstream request");
        self.http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))
    }

    fn parse<T: DeserializeOwned>(&self, body: &str, url: &Url) -> ExternalApiResult<T> {
        serde_json::from_str(body).map_err(|e| {
            error!(service = self.service, %url, error = %e, "Failed to parse upstream response");
            self.invalid_response(format!("Failed to parse response: {}", e))
        })
    }

    fn unexpected_status(&self, status: StatusCode, url: &Url) -> ExternalApiError {
        ExternalApiError::UnexpectedStatus {
            service: self.service.to_string(),
            status: status.as_u16(),
            url: url.to_string(),
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> ExternalApiError {
        let service = self.service.to_string();
        if err.is_timeout() {
            ExternalApiError::Timeout { service }
        } else if err.is_decode() {
            ExternalApiError::InvalidResponse {
                service,
                message: err.to_string(),
            }
        } else {
            ExternalApiError::ConnectionFailed {
                service,
                message: err.to_string(),
            }
        }
    }
}
