//! Typed error taxonomy for the Purview client core
//!
//! Every non-2xx terminal outcome carries the original status code and parsed
//! error body so callers can map failures onto the documented troubleshooting
//! table (missing RBAC roles, malformed payloads, stale identifiers).

use serde_json::Value;

/// Errors surfaced by the token provider, dispatcher and resource clients
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Credential exchange rejected or identity endpoint unreachable after the
    /// provider's own bounded attempts. Never retried by the dispatcher.
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// 4xx other than 404/429, surfaced immediately without retry
    #[error("request rejected with HTTP {status}: {message}")]
    ClientRequest {
        status: u16,
        code: Option<String>,
        message: String,
        body: Value,
    },

    /// 404, split out so callers can distinguish "absent" from other 4xx
    /// (e.g. to decide create vs update)
    #[error("resource not found (HTTP 404): {message}")]
    NotFound {
        code: Option<String>,
        message: String,
        body: Value,
    },

    /// Retry budget exhausted on 429/5xx/transport failures
    #[error("request failed after {attempts} attempts (last status: {})", .status.map(|s| s.to_string()).unwrap_or_else(|| "transport error".into()))]
    RetryExhausted {
        attempts: u32,
        status: Option<u16>,
        body: String,
    },

    /// Transport-level failure outside the retry loop (e.g. building the
    /// request, reading a response body)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response did not have the shape the endpoint documents
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },
}

impl ApiError {
    /// HTTP status attached to this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ClientRequest { status, .. } => Some(*status),
            ApiError::NotFound { .. } => Some(404),
            ApiError::RetryExhausted { status, .. } => *status,
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the target resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// Build the right 4xx error from a parsed response body.
    ///
    /// Purview error bodies usually look like `{"error": {"code": "...",
    /// "message": "..."}}` but Atlas endpoints sometimes return
    /// `{"errorCode": "...", "errorMessage": "..."}`. Both shapes are probed.
    pub fn from_client_status(status: u16, body: Value) -> Self {
        let (code, message) = extract_error_fields(&body);
        if status == 404 {
            ApiError::NotFound { code, message, body }
        } else {
            ApiError::ClientRequest { status, code, message, body }
        }
    }
}

fn extract_error_fields(body: &Value) -> (Option<String>, String) {
    let code = body["error"]["code"]
        .as_str()
        .or_else(|| body["errorCode"].as_str())
        .map(str::to_string);
    let message = body["error"]["message"]
        .as_str()
        .or_else(|| body["errorMessage"].as_str())
        .or_else(|| body.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string());
    (code, message)
}

/// Result alias used across the API modules
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_body_extraction_arm_shape() {
        let body = json!({"error": {"code": "Unauthorized", "message": "missing role"}});
        let err = ApiError::from_client_status(403, body);
        match err {
            ApiError::ClientRequest { status, code, message, .. } => {
                assert_eq!(status, 403);
                assert_eq!(code.as_deref(), Some("Unauthorized"));
                assert_eq!(message, "missing role");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_body_extraction_atlas_shape() {
        let body = json!({"errorCode": "ATLAS-404-00-005", "errorMessage": "guid not found"});
        let err = ApiError::from_client_status(404, body);
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
        match err {
            ApiError::NotFound { code, message, .. } => {
                assert_eq!(code.as_deref(), Some("ATLAS-404-00-005"));
                assert_eq!(message, "guid not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unstructured_error_body_falls_back_to_raw_text() {
        let err = ApiError::from_client_status(400, json!("bad payload"));
        match err {
            ApiError::ClientRequest { code, message, .. } => {
                assert!(code.is_none());
                assert_eq!(message, "bad payload");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_retry_exhausted_display() {
        let err = ApiError::RetryExhausted { attempts: 5, status: Some(503), body: String::new() };
        assert!(err.to_string().contains("5 attempts"));
        assert!(err.to_string().contains("503"));
        assert_eq!(err.status(), Some(503));
    }
}
