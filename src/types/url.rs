//! Typed view of URL entries returned by the `urls` resource.

use super::api::ApiError;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One URL entry. Unknown fields are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub short_url: String,
    #[serde(default)]
    pub long_url: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UrlRecord {
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Per-item failure reported inside an otherwise successful batch.
    pub fn item_error(&self) -> Option<&ApiError> {
        self.error.as_ref().filter(|e| !e.is_empty())
    }
}
