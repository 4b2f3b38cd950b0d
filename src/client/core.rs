use crate::batch::{BatchConfig, BatchOrchestrator};
use crate::client::builder::TinyccClientBuilder;
use crate::config::ClientConfig;
use crate::transport::{ApiRequest, Transport};
use crate::types::{AggregatedResponse, BatchResponse, ResponseMeta};
use crate::Result;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Client for the tiny.cc REST API v3.
///
/// Immutable after construction; derive variants with
/// [`with_working_domain`](Self::with_working_domain). Clones share the transport.
#[derive(Clone)]
pub struct TinyccClient {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) orchestrator: BatchOrchestrator,
    pub(crate) working_domain: Option<String>,
}

impl TinyccClient {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        batch: BatchConfig,
        working_domain: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            transport,
            orchestrator: BatchOrchestrator::new(batch)?,
            working_domain,
        })
    }

    pub fn builder() -> TinyccClientBuilder {
        TinyccClientBuilder::new()
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        TinyccClientBuilder::from_config(config).build()
    }

    pub fn batch_config(&self) -> &BatchConfig {
        self.orchestrator.config()
    }

    pub fn working_domain(&self) -> Option<&str> {
        self.working_domain.as_deref()
    }

    /// Same client, different working domain. `None` means the account default.
    pub fn with_working_domain(&self, domain: Option<String>) -> Self {
        Self {
            transport: self.transport.clone(),
            orchestrator: self.orchestrator.clone(),
            working_domain: domain,
        }
    }

    /// One call, with the working domain attached.
    pub(crate) async fn call(&self, mut request: ApiRequest) -> Result<Value> {
        if let Some(domain) = &self.working_domain {
            request = request.with_query("domain", domain.clone());
        }
        self.transport.call(request).await
    }

    /// One batch call, parsed for the orchestrator.
    pub(crate) async fn call_batch(&self, request: ApiRequest) -> Result<BatchResponse> {
        BatchResponse::from_value(self.call(request).await?)
    }

    /// One non-batched call reported in the aggregated shape.
    pub(crate) async fn call_single(
        &self,
        request: ApiRequest,
        result_key: Option<&str>,
    ) -> AggregatedResponse {
        let started = Instant::now();
        let outcome = self.call_batch(request).await;
        let meta = ResponseMeta::from_elapsed(started.elapsed());
        match outcome {
            Ok(resp) => {
                let items = result_key
                    .and_then(|k| resp.collection(k))
                    .map(<[Value]>::to_vec)
                    .unwrap_or_default();
                let aggregated = AggregatedResponse::success(result_key, items, meta);
                match resp.page {
                    Some(page) => aggregated.with_page(page),
                    None => aggregated,
                }
            }
            Err(e) => AggregatedResponse::failure(e.to_api_error(), meta),
        }
    }
}

impl std::fmt::Debug for TinyccClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TinyccClient")
            .field("batch", self.orchestrator.config())
            .field("working_domain", &self.working_domain)
            .finish_non_exhaustive()
    }
}
