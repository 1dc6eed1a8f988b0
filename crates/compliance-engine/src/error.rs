//! Gateway error kinds and the JSON error envelope

use serde::Serialize;
use serde_json::Value;
use shared_types::ValidationError;
use thiserror::Error;

/// Status used when the upstream could not be reached at all
pub const BAD_GATEWAY: u16 = 502;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    #[error("Upstream returned status {status}")]
    UpstreamUnavailable { status: u16, details: Value },

    #[error("Malformed upstream payload: {0}")]
    MalformedUpstreamPayload(String),

    #[error("Unexpected server error: {0}")]
    Unexpected(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl GatewayError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::MethodNotAllowed(_) => 405,
            GatewayError::InvalidRequest(_) => 400,
            GatewayError::UpstreamUnavailable { status, .. } => {
                if (400..=599).contains(status) {
                    *status
                } else {
                    BAD_GATEWAY
                }
            }
            GatewayError::MalformedUpstreamPayload(_) | GatewayError::Unexpected(_) => 500,
        }
    }

    /// JSON envelope returned to the caller
    pub fn body(&self) -> ErrorBody {
        match self {
            GatewayError::MethodNotAllowed(_) => ErrorBody {
                error: "Method Not Allowed",
                details: None,
            },
            GatewayError::InvalidRequest(e) => ErrorBody {
                error: "Invalid request body",
                details: Some(Value::String(e.to_string())),
            },
            GatewayError::UpstreamUnavailable { details, .. } => ErrorBody {
                error: "AI service error",
                details: Some(details.clone()),
            },
            GatewayError::MalformedUpstreamPayload(msg) => ErrorBody {
                error: "Malformed AI response",
                details: Some(Value::String(msg.clone())),
            },
            GatewayError::Unexpected(msg) => ErrorBody {
                error: "Server error",
                details: Some(Value::String(msg.clone())),
            },
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::UpstreamUnavailable {
            status: err.status().map_or(BAD_GATEWAY, |s| s.as_u16()),
            details: serde_json::json!({ "message": err.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_codes() {
        assert_eq!(GatewayError::MethodNotAllowed("GET".into()).status_code(), 405);
        assert_eq!(
            GatewayError::InvalidRequest(ValidationError::NoStates).status_code(),
            400
        );
        assert_eq!(
            GatewayError::MalformedUpstreamPayload("bad".into()).status_code(),
            500
        );
        assert_eq!(GatewayError::Unexpected("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_upstream_status_mirrored() {
        let err = GatewayError::UpstreamUnavailable {
            status: 429,
            details: json!({"type": "error"}),
        };
        assert_eq!(err.status_code(), 429);

        let err = GatewayError::UpstreamUnavailable {
            status: 529,
            details: Value::Null,
        };
        assert_eq!(err.status_code(), 529);
    }

    #[test]
    fn test_upstream_success_like_status_becomes_bad_gateway() {
        let err = GatewayError::UpstreamUnavailable {
            status: 302,
            details: Value::Null,
        };
        assert_eq!(err.status_code(), BAD_GATEWAY);
    }

    #[test]
    fn test_method_not_allowed_body_has_no_details() {
        let body = serde_json::to_value(GatewayError::MethodNotAllowed("PUT".into()).body()).unwrap();
        assert_eq!(body, json!({"error": "Method Not Allowed"}));
    }

    #[test]
    fn test_upstream_body_carries_details() {
        let details = json!({"type": "error", "error": {"type": "overloaded_error"}});
        let err = GatewayError::UpstreamUnavailable {
            status: 529,
            details: details.clone(),
        };
        let body = serde_json::to_value(err.body()).unwrap();

        assert_eq!(body["error"], "AI service error");
        assert_eq!(body["details"], details);
    }

    #[test]
    fn test_invalid_request_body_describes_problem() {
        let body =
            serde_json::to_value(GatewayError::from(ValidationError::StatesNotArray).body()).unwrap();

        assert_eq!(body["error"], "Invalid request body");
        assert_eq!(body["details"], "states must be an array");
    }
}
