//! Error responses for the compliance server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use compliance_engine::GatewayError;
use shared_types::ValidationError;
use thiserror::Error;

/// Server error: a gateway failure rendered as the JSON error envelope
#[derive(Error, Debug)]
#[error(transparent)]
pub struct ServerError(#[from] GatewayError);

impl From<ValidationError> for ServerError {
    fn from(err: ValidationError) -> Self {
        ServerError(GatewayError::InvalidRequest(err))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "Analysis failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.0, "Analysis rejected");
        }

        (status, Json(self.0.body())).into_response()
    }
}
