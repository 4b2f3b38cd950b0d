//! Batch-level and aggregated response shapes.

use super::api::{ApiError, Page, ResponseMeta};
use super::url::UrlRecord;
use crate::Result;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Success payload of one batch call.
///
/// `version` and `page` are lifted out; every other top-level key is kept as a
/// named collection (e.g. `urls`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<Page>,
    #[serde(flatten)]
    pub collections: Map<String, Value>,
}

impl BatchResponse {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Items of a named collection; `None` if the key is missing or not a list.
    pub fn collection(&self, key: &str) -> Option<&[Value]> {
        self.collections
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    pub fn with_collection(mut self, key: impl Into<String>, items: Vec<Value>) -> Self {
        self.collections.insert(key.into(), Value::Array(items));
        self
    }
}

/// Merged outcome of one orchestration call.
///
/// Serializes to `{ <result_key>: [...], error, meta }` on success and to
/// `{ error, meta }` on failure.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedResponse {
    pub result_key: Option<String>,
    pub items: Option<Vec<Value>>,
    pub page: Option<Page>,
    pub error: ApiError,
    pub meta: ResponseMeta,
}

impl AggregatedResponse {
    pub fn success(result_key: Option<&str>, items: Vec<Value>, meta: ResponseMeta) -> Self {
        let result_key = result_key.map(str::to_string);
        let items = result_key.as_ref().map(|_| items);
        Self {
            result_key,
            items,
            page: None,
            error: ApiError::empty(),
            meta,
        }
    }

    pub fn failure(error: ApiError, meta: ResponseMeta) -> Self {
        Self {
            result_key: None,
            items: None,
            page: None,
            error,
            meta,
        }
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }

    pub fn items(&self) -> &[Value] {
        self.items.as_deref().unwrap_or(&[])
    }

    /// Typed view over the collected items.
    pub fn url_records(&self) -> Result<Vec<UrlRecord>> {
        self.items().iter().map(UrlRecord::from_value).collect()
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for AggregatedResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let (Some(key), Some(items)) = (&self.result_key, &self.items) {
            map.serialize_entry(key, items)?;
        }
        if let Some(page) = &self.page {
            map.serialize_entry("page", page)?;
        }
        map.serialize_entry("error", &self.error)?;
        map.serialize_entry("meta", &self.meta)?;
        map.end()
    }
}
