//! Shared test fixtures: a scripted in-memory transport and a batch probe.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tinycc_client::transport::{ApiRequest, Transport};
use tinycc_client::types::BatchResponse;
use tinycc_client::{Error, Result};

type Responder = dyn Fn(&ApiRequest) -> Result<Value> + Send + Sync;

/// Transport that answers from a closure and records every request.
pub struct ScriptedTransport {
    responder: Box<Responder>,
    delay: Duration,
    requests: Mutex<Vec<ApiRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&ApiRequest) -> Result<Value> + Send + Sync + 'static,
    {
        Self::with_delay(responder, Duration::from_millis(5))
    }

    pub fn with_delay<F>(responder: F, delay: Duration) -> Arc<Self>
    where
        F: Fn(&ApiRequest) -> Result<Value> + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            delay,
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        })
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn call(&self, request: ApiRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        (self.responder)(&request)
    }
}

/// Wraps `items` the way the API wraps them in a successful batch response.
pub fn ok_body(key: &str, items: Vec<Value>) -> Value {
    json!({
        "version": "3.1",
        key: items,
        "error": {"code": 0, "message": "", "details": ""}
    })
}

/// Records callback activity for orchestrator-level tests.
#[derive(Default)]
pub struct BatchProbe {
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub batch_sizes: Mutex<Vec<usize>>,
    /// `(started, first_item)` / `(finished, first_item)` in event order.
    pub events: Mutex<Vec<(bool, u32)>>,
}

impl BatchProbe {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Echo the batch back as `urls`, sleeping `delay_for(first_item)` first.
    pub async fn echo(
        self: Arc<Self>,
        batch: Vec<u32>,
        delay_for: impl Fn(u32) -> u64,
    ) -> Result<BatchResponse> {
        let first = batch.first().copied().unwrap_or_default();
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.batch_sizes.lock().unwrap().push(batch.len());
        self.events.lock().unwrap().push((true, first));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(delay_for(first))).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.events.lock().unwrap().push((false, first));
        Ok(BatchResponse {
            version: "3.1".into(),
            ..Default::default()
        }
        .with_collection("urls", batch.into_iter().map(|i| json!(i)).collect()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.lock().unwrap().clone()
    }

    pub fn events(&self) -> Vec<(bool, u32)> {
        self.events.lock().unwrap().clone()
    }
}

pub fn remote(code: i64, message: &str) -> Error {
    Error::Remote(tinycc_client::ApiError::new(code, message, ""))
}
