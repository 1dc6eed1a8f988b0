//! Lambda request handling for the analyze function
//!
//! The function has a single job, so every path routes to the gateway. CORS
//! headers are added to every response so the browser form can call the
//! function URL directly.

use compliance_engine::ComplianceGateway;
use lambda_http::http::{header, Method, StatusCode};
use lambda_http::{Body, Error, Request, Response};
use serde_json::Value;
use tracing::instrument;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const ALLOW_ORIGIN: &str = "*";
const ALLOW_METHODS: &str = "POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Main Lambda handler
#[instrument(skip(gateway, event), fields(method = %event.method(), path = %event.uri().path()))]
pub async fn handler(gateway: &ComplianceGateway, event: Request) -> Result<Response<Body>, Error> {
    if event.method() == Method::OPTIONS {
        return handle_cors_preflight();
    }

    let reply = gateway
        .handle(event.method().as_str(), event.body().as_ref())
        .await;

    json_response(reply.status, &reply.body)
}

/// Handle CORS preflight
fn handle_cors_preflight() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN)
        .header(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS)
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS)
        .header(header::ACCESS_CONTROL_MAX_AGE, "86400")
        .body(Body::Empty)?)
}

/// Create a JSON response
fn json_response(status: u16, body: &Value) -> Result<Response<Body>, Error> {
    let status = StatusCode::from_u16(status)?;

    Ok(Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN)
        .header(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS)
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS)
        .body(Body::from(serde_json::to_string(body)?))?)
}
