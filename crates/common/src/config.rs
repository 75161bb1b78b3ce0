//! Configuration management for the application.
//!
//! This module provides a centralized configuration system that loads settings
//! from configuration files and environment variables.
//!
//! ## Example Configuration
//!
//! ```toml
//! [server]
//! port = 8080
//! request_timeout_seconds = 60
//!
//! [upstream]
//! routes_base_url = "https://api.example.com"
//! directory_base_url = "https://jsonplaceholder.typicode.com"
//! connect_timeout_seconds = 10
//! read_timeout_seconds = 30
//!
//! [enrichment]
//! max_concurrent_status_checks = 32
//!
//! [telemetry]
//! json_logging = true
//! log_level = "info"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream REST services the proxy republishes
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Overall deadline for a single inbound request
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// CORS allowed origins
    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Serve the OpenAPI document and Swagger UI
    #[serde(default = "default_true")]
    pub enable_swagger: bool,
}

/// Upstream service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the route registry
    #[serde(default = "default_routes_base_url")]
    pub routes_base_url: String,

    /// Base URL of the user/todo directory
    #[serde(default = "default_directory_base_url")]
    pub directory_base_url: String,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// Read timeout in seconds
    #[serde(default = "default_read_timeout")]
    pub read_timeout_seconds: u64,
}

/// Route enrichment configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Cap on concurrent status checks during bulk enrichment.
    ///
    /// Unset means one concurrent check per route in the page.
    #[serde(default)]
    pub max_concurrent_status_checks: Option<usize>,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Enable JSON logging format
    #[serde(default)]
    pub json_logging: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    60
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_routes_base_url() -> String {
    "https://api.example.com".to_string()
}

fn default_directory_base_url() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_read_timeout() -> u64 {
    30
}

fn default_service_name() -> String {
    "sitemap-proxy".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
            cors_allowed_origins: default_cors_origins(),
            enable_swagger: true,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            routes_base_url: default_routes_base_url(),
            directory_base_url: default_directory_base_url(),
            connect_timeout_seconds: default_connect_timeout(),
            read_timeout_seconds: default_read_timeout(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            json_logging: false,
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the `config/` directory and the environment.
    ///
    /// The configuration is loaded in the following order (later sources override earlier ones):
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/{environment}.toml (if exists, where environment is from APP_ENV)
    /// 4. Environment variables (prefixed with APP_)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sitemap_common::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load configuration");
    /// println!("Server will run on {}:{}", config.server.host, config.server.port);
    /// ```
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("config"))
    }

    /// Load configuration using `dir` in place of the `config/` directory
    pub fn load_from(dir: &Path) -> Result<Self> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(
                config::File::with_name(&dir.join("default").to_string_lossy())
                    .required(false),
            )
            .add_source(
                config::File::with_name(&dir.join(&env).to_string_lossy())
                    .required(false),
            )
            // Example: APP_UPSTREAM__ROUTES_BASE_URL=http://localhost:9000
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.server.request_timeout_seconds == 0 {
            anyhow::bail!("Request timeout must be greater than 0");
        }

        validate_base_url("upstream.routes_base_url", &self.upstream.routes_base_url)?;
        validate_base_url(
            "upstream.directory_base_url",
            &self.upstream.directory_base_url,
        )?;

        if self.upstream.connect_timeout_seconds == 0 {
            anyhow::bail!("Upstream connect timeout must be greater than 0");
        }

        if self.upstream.read_timeout_seconds == 0 {
            anyhow::bail!("Upstream read timeout must be greater than 0");
        }

        if self.enrichment.max_concurrent_status_checks == Some(0) {
            anyhow::bail!("max_concurrent_status_checks must be greater than 0 when set");
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                valid_log_levels.join(", ")
            );
        }

        Ok(())
    }

    /// Get the upstream connect timeout as a Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.connect_timeout_seconds)
    }

    /// Get the upstream read timeout as a Duration
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.read_timeout_seconds)
    }

    /// Get the inbound request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_seconds)
    }

    /// Get server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Create a development configuration with sensible defaults
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                ..ServerConfig::default()
            },
            telemetry: TelemetryConfig {
                service_name: "sitemap-proxy-dev".to_string(),
                json_logging: false,
                log_level: "debug".to_string(),
            },
            ..Self::default()
        }
    }
}

fn validate_base_url(name: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{} is not a valid URL: {}", name, value))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("{} must use http or https, got '{}'", name, url.scheme());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Invalid port
        config.server.port = 0;
        assert!(config.validate().is_err());
        config.server.port = 8080;

        // Invalid upstream URL
        config.upstream.routes_base_url = "not a url".to_string();
        assert!(config.validate().is_err());
        config.upstream.routes_base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
        config.upstream.routes_base_url = "http://localhost:9000".to_string();

        // Zero concurrency cap
        config.enrichment.max_concurrent_status_checks = Some(0);
        assert!(config.validate().is_err());
        config.enrichment.max_concurrent_status_checks = Some(8);
        assert!(config.validate().is_ok());

        // Invalid log level
        config.telemetry.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_timeouts() {
        let config = AppConfig::default();
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.read_timeout(), Duration::from_secs(30));
        assert_eq!(config.server_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            r#"
[server]
port = 9090

[upstream]
routes_base_url = "http://routes.internal"

[enrichment]
max_concurrent_status_checks = 4
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.upstream.routes_base_url, "http://routes.internal");
        assert_eq!(
            config.upstream.directory_base_url,
            "https://jsonplaceholder.typicode.com"
        );
        assert_eq!(config.enrichment.max_concurrent_status_checks, Some(4));
    }

    #[test]
    fn test_load_from_missing_directory_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent")).unwrap();
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.enrichment.max_concurrent_status_checks.is_none());
    }
}
