//! Payload primitives shared by every API response.

use crate::error::LOCAL_ERROR_CODE;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Error payload as the API reports it.
///
/// `code == 0` with empty strings is the "no error" sentinel. Decoding is
/// lenient: `null` fields read as empty, a numeric string `code` is accepted,
/// and non-string `message`/`details` values keep their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, deserialize_with = "lenient_code")]
    pub code: i64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub details: String,
}

fn lenient_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => 0,
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(LOCAL_ERROR_CODE),
        Value::String(s) if s.trim().is_empty() => 0,
        Value::String(s) => s.trim().parse().unwrap_or(LOCAL_ERROR_CODE),
        _ => LOCAL_ERROR_CODE,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

impl ApiError {
    pub fn new(code: i64, message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: details.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(0, "", "")
    }

    pub fn is_empty(&self) -> bool {
        self.code == 0 && self.message.is_empty() && self.details.is_empty()
    }

    /// Extract `{ "error": {...} }` from a response body.
    ///
    /// Returns `None` only when the key is absent or holds the "no error"
    /// sentinel. Any other value is a remote failure, even if its shape is off.
    pub fn from_body(body: &Value) -> Option<Self> {
        let err = body.get("error")?;
        let parsed = match err {
            Value::Null | Value::Bool(false) => return None,
            Value::Object(_) => Self::deserialize(err).unwrap_or_else(|e| {
                Self::new(
                    LOCAL_ERROR_CODE,
                    "unreadable error payload",
                    format!("{}: {}", e, err),
                )
            }),
            Value::String(s) => Self::new(LOCAL_ERROR_CODE, s.clone(), ""),
            Value::Number(n) if n.as_i64() == Some(0) => return None,
            other => Self::new(LOCAL_ERROR_CODE, "unrecognized error payload", other.to_string()),
        };
        if parsed.is_empty() {
            None
        } else {
            Some(parsed)
        }
    }
}

impl Default for ApiError {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Paging block of list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub results_count: u64,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub offset: u64,
}

/// Timing metadata attached to aggregated responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// Wall-clock seconds from orchestration start to resolution.
    pub request_time: f64,
}

impl ResponseMeta {
    pub fn from_elapsed(elapsed: std::time::Duration) -> Self {
        Self {
            request_time: elapsed.as_secs_f64(),
        }
    }
}
