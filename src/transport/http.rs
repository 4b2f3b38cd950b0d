use super::{ApiRequest, Transport, TransportError};
use crate::config::HttpConfig;
use crate::types::ApiError;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use reqwest::Proxy;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

/// `reqwest`-backed transport with HTTP basic auth.
pub struct HttpTransport {
    client: reqwest::Client,
    api_root_url: String,
    username: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(
        api_root_url: &str,
        username: impl Into<String>,
        api_key: impl Into<String>,
        http: &HttpConfig,
    ) -> Result<Self> {
        let api_root_url = api_root_url.trim_end_matches('/').to_string();
        Url::parse(&api_root_url).map_err(|e| {
            Error::configuration_with_context(
                "api_root_url is not a valid URL",
                ErrorContext::new()
                    .with_field_path("api_root_url")
                    .with_details(e.to_string())
                    .with_source("http_transport"),
            )
        })?;

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .pool_max_idle_per_host(http.pool_max_idle_per_host);

        if let Some(proxy_url) = &http.proxy_url {
            if let Ok(proxy) = Proxy::all(proxy_url) {
                builder = builder.proxy(proxy);
            }
        }

        let client = builder.build().map_err(TransportError::Http)?;

        Ok(Self {
            client,
            api_root_url,
            username: username.into(),
            api_key: api_key.into(),
        })
    }

    pub fn api_root_url(&self) -> &str {
        &self.api_root_url
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.api_root_url,
            request.resource.trim_start_matches('/')
        ))
        .map_err(TransportError::InvalidUrl)?;
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &request.query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, request: ApiRequest) -> Result<Value> {
        let url = self.url_for(&request)?;
        debug!(method = %request.method, url = %url, "tinycc request");

        let mut req = self
            .client
            .request(request.method.clone(), url)
            .basic_auth(&self.username, Some(&self.api_key))
            .header("accept", "application/json");
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let start = Instant::now();
        let resp = req.send().await.map_err(TransportError::Http)?;
        let status = resp.status();
        let text = resp.text().await.map_err(TransportError::Http)?;

        info!(
            method = %request.method,
            resource = request.resource.as_str(),
            http_status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "tinycc request finished"
        );

        let json: Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(_) if !status.is_success() => {
                return Err(TransportError::Status {
                    status: status.as_u16(),
                    body: text,
                }
                .into())
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(api_error) = ApiError::from_body(&json) {
            return Err(Error::Remote(api_error));
        }
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            }
            .into());
        }
        Ok(json)
    }
}
