//! 客户端配置：从 YAML 文件或环境变量构建不可变配置。
//!
//! Client configuration.
//!
//! A [`ClientConfig`] is loaded once (YAML file, environment, or both) and then
//! only read. Environment variables win over file values.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `TINYCC_API_ROOT_URL` | `api_root_url` |
//! | `TINYCC_USERNAME` | `username` |
//! | `TINYCC_API_KEY` | `api_key` |
//! | `TINYCC_DOMAIN` | `working_domain` |
//! | `TINYCC_BATCH_LIMIT` | `batch.batch_limit` |
//! | `TINYCC_PARALLEL_STREAMS` | `batch.parallel_streams` |
//! | `TINYCC_API_VERSION` | `batch.expected_version` |
//! | `TINYCC_HTTP_TIMEOUT_SECS` | `http.timeout_secs` |
//! | `TINYCC_HTTP_POOL_MAX_IDLE_PER_HOST` | `http.pool_max_idle_per_host` |
//! | `TINYCC_PROXY_URL` | `http.proxy_url` |

use crate::batch::BatchConfig;
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// HTTP client knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub pool_max_idle_per_host: usize,
    pub proxy_url: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            pool_max_idle_per_host: 8,
            proxy_url: None,
        }
    }
}

impl HttpConfig {
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(v) = env::var("TINYCC_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|v| *v > 0)
        {
            self.timeout_secs = v;
        }
        if let Some(v) = env::var("TINYCC_HTTP_POOL_MAX_IDLE_PER_HOST")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
        {
            self.pool_max_idle_per_host = v;
        }
        if let Ok(v) = env::var("TINYCC_PROXY_URL") {
            if !v.is_empty() {
                self.proxy_url = Some(v);
            }
        }
        self
    }
}

/// Everything needed to build a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_root_url: String,
    pub username: String,
    pub api_key: String,
    pub working_domain: Option<String>,
    pub batch: BatchConfig,
    pub http: HttpConfig,
}

impl ClientConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| {
            Error::configuration_with_context(
                "invalid client configuration",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("client_config"),
            )
        })
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Defaults overlaid with environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("TINYCC_API_ROOT_URL") {
            self.api_root_url = v;
        }
        if let Ok(v) = env::var("TINYCC_USERNAME") {
            self.username = v;
        }
        if let Ok(v) = env::var("TINYCC_API_KEY") {
            self.api_key = v;
        }
        if let Ok(v) = env::var("TINYCC_DOMAIN") {
            if !v.is_empty() {
                self.working_domain = Some(v);
            }
        }
        self.batch = self.batch.with_env_overrides();
        self.http = self.http.with_env_overrides();
        self
    }

    /// Required credentials present and batch limits usable.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("api_root_url", &self.api_root_url),
            ("username", &self.username),
            ("api_key", &self.api_key),
        ] {
            if value.trim().is_empty() {
                return Err(Error::configuration_with_context(
                    format!("Missing {}", field),
                    ErrorContext::new()
                        .with_field_path(field)
                        .with_source("client_config"),
                ));
            }
        }
        self.batch.validate()
    }
}
