//! API handlers for the compliance server

use axum::{body::Bytes, extract::State, http::Method, Json};
use compliance_engine::GatewayError;
use serde::Serialize;
use shared_types::{AnalysisRequest, AnalysisResult};
use tracing::{debug, info};

use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "compliance-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler: POST /api/analyze
///
/// Malformed bodies get the same error envelope as every other failure.
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalysisResult>, ServerError> {
    let request = AnalysisRequest::from_json(&body)?;
    info!(states = ?request.states, "Analysis request");
    debug!(questions_chars = request.questions.len(), "Questions received");

    let result = state.gateway.analyze(&request).await?;
    Ok(Json(result))
}

/// Handler: any non-POST method on the analyze routes
pub async fn handle_method_not_allowed(method: Method) -> ServerError {
    GatewayError::MethodNotAllowed(method.to_string()).into()
}
