use crate::transport::TransportError;
use crate::types::ApiError;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error
    /// (e.g., "batch.batch_limit", "selection")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected value, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "batch_config", "client_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the tiny.cc client.
///
/// Remote failures keep the payload the API sent, so callers can inspect the
/// original `code`, `message` and `details`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Version of client ({client}) doesn't match version of API ({api})")]
    VersionMismatch { client: String, api: String },

    #[error("Remote error {}: {}", .0.code, .0.message)]
    Remote(ApiError),

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

/// Code reported for failures that never reached the API and carry no status.
pub const LOCAL_ERROR_CODE: i64 = -1;

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    pub fn version_mismatch(client: impl Into<String>, api: impl Into<String>) -> Self {
        Error::VersionMismatch {
            client: client.into(),
            api: api.into(),
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Validation { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    /// Remote payload, if the API produced one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Remote(e) => Some(e),
            _ => None,
        }
    }

    /// Convert into the structured `{code, message, details}` payload used in
    /// aggregated responses.
    ///
    /// Remote payloads are passed through unchanged, except an empty one,
    /// which would read as the "no error" sentinel.
    pub fn to_api_error(&self) -> ApiError {
        match self {
            Error::Remote(e) if e.is_empty() => ApiError::new(
                LOCAL_ERROR_CODE,
                "remote call failed without an error payload",
                "",
            ),
            Error::Remote(e) => e.clone(),
            Error::VersionMismatch { .. } => ApiError::new(0, self.to_string(), ""),
            Error::Transport(TransportError::Status { status, body }) => {
                ApiError::new(i64::from(*status), self.to_string(), body.clone())
            }
            Error::Configuration { message, context } | Error::Validation { message, context } => {
                ApiError::new(
                    LOCAL_ERROR_CODE,
                    message.clone(),
                    context.details.clone().unwrap_or_default(),
                )
            }
            other => ApiError::new(LOCAL_ERROR_CODE, other.to_string(), ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_mismatch_message_names_both_versions() {
        let err = Error::version_mismatch("3.1", "3.0");
        assert_eq!(
            err.to_string(),
            "Version of client (3.1) doesn't match version of API (3.0)"
        );
        let payload = err.to_api_error();
        assert_eq!(payload.code, 0);
        assert!(payload.message.contains("3.0"));
    }

    #[test]
    fn remote_payload_passes_through() {
        let original = ApiError::new(5, "rate limited", "slow down");
        let err = Error::Remote(original.clone());
        assert_eq!(err.to_api_error(), original);
        assert_eq!(err.api_error(), Some(&original));
    }

    #[test]
    fn empty_remote_payload_never_reads_as_success() {
        let payload = Error::Remote(ApiError::empty()).to_api_error();
        assert!(!payload.is_empty());
        assert_eq!(payload.code, LOCAL_ERROR_CODE);
    }

    #[test]
    fn configuration_error_formats_context() {
        let err = Error::configuration_with_context(
            "batch_limit must be positive",
            ErrorContext::new()
                .with_field_path("batch.batch_limit")
                .with_source("batch_config"),
        );
        let text = err.to_string();
        assert!(text.contains("field: batch.batch_limit"));
        assert!(text.contains("source: batch_config"));
        assert_eq!(err.to_api_error().code, LOCAL_ERROR_CODE);
    }
}
