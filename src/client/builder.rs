use crate::batch::BatchConfig;
use crate::client::core::TinyccClient;
use crate::config::{ClientConfig, HttpConfig};
use crate::transport::{HttpTransport, Transport};
use crate::Result;
use std::sync::Arc;

/// Builder for creating clients with custom configuration.
pub struct TinyccClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl TinyccClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            transport: None,
        }
    }

    /// Start from a loaded configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    /// Start from defaults overlaid with `TINYCC_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_config(ClientConfig::from_env())
    }

    pub fn api_root_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_root_url = url.into();
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.config.username = username.into();
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = api_key.into();
        self
    }

    /// Operate on a non-default domain.
    pub fn working_domain(mut self, domain: impl Into<String>) -> Self {
        self.config.working_domain = Some(domain.into());
        self
    }

    pub fn batch_config(mut self, batch: BatchConfig) -> Self {
        self.config.batch = batch;
        self
    }

    pub fn http_config(mut self, http: HttpConfig) -> Self {
        self.config.http = http;
        self
    }

    /// Use a custom transport instead of HTTP.
    ///
    /// Credentials are not required in that case; the transport owns them.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<TinyccClient> {
        let transport = match self.transport {
            Some(t) => {
                self.config.batch.validate()?;
                t
            }
            None => {
                self.config.validate()?;
                let http = HttpTransport::new(
                    &self.config.api_root_url,
                    self.config.username.clone(),
                    self.config.api_key.clone(),
                    &self.config.http,
                )?;
                Arc::new(http) as Arc<dyn Transport>
            }
        };

        TinyccClient::new(transport, self.config.batch, self.config.working_domain)
    }
}

impl Default for TinyccClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
