//! Interview question compliance analysis
//!
//! Takes interview questions and the US states a role is hiring in, asks an
//! LLM to review them against employment law, and returns a normalized
//! [`AnalysisResult`]:
//!
//! ```text
//! POST body → validate → build_prompt → CompletionClient → extract_and_parse → AnalysisResult
//! ```
//!
//! Frontends (Lambda, axum server) call [`ComplianceGateway::handle`] or
//! compose the steps themselves via [`ComplianceGateway::analyze`].

pub mod config;
pub mod error;
pub mod payload;
pub mod prompt;
pub mod upstream;

use std::sync::Arc;

use serde_json::Value;
use shared_types::{AnalysisRequest, AnalysisResult};
use tracing::{error, info, instrument, warn};

pub use config::{ConfigError, GatewayConfig};
pub use error::{ErrorBody, GatewayError};
pub use payload::extract_and_parse;
pub use prompt::build_prompt;
pub use upstream::{AnthropicClient, CompletionClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Status code and JSON body produced by [`ComplianceGateway::handle`]
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: Value,
}

/// The analysis pipeline, independent of any HTTP framework
#[derive(Clone)]
pub struct ComplianceGateway {
    client: Arc<dyn CompletionClient>,
}

impl ComplianceGateway {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Gateway backed by the Anthropic Messages API
    pub fn anthropic(config: GatewayConfig) -> Self {
        Self::new(Arc::new(AnthropicClient::new(config)))
    }

    /// Run one request through the pipeline, converting every failure into
    /// an error envelope
    pub async fn handle(&self, method: &str, body: &[u8]) -> GatewayResponse {
        let outcome = match self.process(method, body).await {
            Ok(result) => serde_json::to_value(&result)
                .map_err(|e| GatewayError::Unexpected(format!("failed to encode result: {}", e))),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(body) => GatewayResponse { status: 200, body },
            Err(err) => {
                let status = err.status_code();
                if status >= 500 {
                    error!(status, error = %err, "Analysis failed");
                } else {
                    warn!(status, error = %err, "Analysis rejected");
                }
                // ErrorBody only holds strings and JSON values
                let body = serde_json::to_value(err.body()).unwrap_or(Value::Null);
                GatewayResponse { status, body }
            }
        }
    }

    async fn process(&self, method: &str, body: &[u8]) -> Result<AnalysisResult, GatewayError> {
        if !method.eq_ignore_ascii_case("POST") {
            return Err(GatewayError::MethodNotAllowed(method.to_string()));
        }
        let request = AnalysisRequest::from_json(body)?;
        self.analyze(&request).await
    }

    /// validate → build_prompt → upstream call → extract_and_parse
    #[instrument(skip(self, request), fields(states = request.states.len()))]
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, GatewayError> {
        request.validate()?;

        let prompt = build_prompt(&request.questions, &request.states);
        let raw = self.client.complete(&prompt).await?;
        let result = extract_and_parse(&raw)?;

        info!(
            overall_risk = ?result.overall_risk,
            questions = result.analyses.len(),
            problematic = result.problematic().count(),
            "Analysis complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Mutex;

    /// Returns a canned response and remembers the prompts it was sent
    struct StubClient {
        reply: Result<Value, (u16, Value)>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubClient {
        fn answering(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(json!({"content": [{"type": "text", "text": text}]})),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing(status: u16, details: Value) -> Arc<Self> {
            Arc::new(Self {
                reply: Err((status, details)),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionClient for StubClient {
        async fn complete(&self, prompt: &str) -> Result<Value, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(value) => Ok(value.clone()),
                Err((status, details)) => Err(GatewayError::UpstreamUnavailable {
                    status: *status,
                    details: details.clone(),
                }),
            }
        }
    }

    const ANALYSIS: &str = r#"{"overallRisk":"Low","summary":"No issues found.","analyses":[{"question":"Why do you want this job?","status":"compliant","riskLevel":"Low","issues":[],"affectedStates":[],"legalBasis":"","alternative":""}]}"#;

    const BODY: &[u8] = br#"{"questions": "Why do you want this job?", "states": ["Florida", "Texas"]}"#;

    #[tokio::test]
    async fn test_handle_success() {
        let stub = StubClient::answering(ANALYSIS);
        let gateway = ComplianceGateway::new(stub.clone());

        let response = gateway.handle("POST", BODY).await;

        assert_eq!(response.status, 200);
        assert_eq!(response.body, serde_json::from_str::<Value>(ANALYSIS).unwrap());
        assert_eq!(stub.calls(), 1);

        let prompts = stub.prompts.lock().unwrap();
        assert!(prompts[0].contains("US states: Florida, Texas."));
        assert!(prompts[0].contains("Why do you want this job?"));
    }

    #[tokio::test]
    async fn test_handle_rejects_non_post() {
        let stub = StubClient::answering(ANALYSIS);
        let gateway = ComplianceGateway::new(stub.clone());

        for method in ["GET", "PUT", "DELETE", "OPTIONS"] {
            let response = gateway.handle(method, BODY).await;
            assert_eq!(response.status, 405);
            assert_eq!(response.body, json!({"error": "Method Not Allowed"}));
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_handle_invalid_body_skips_upstream() {
        let stub = StubClient::answering(ANALYSIS);
        let gateway = ComplianceGateway::new(stub.clone());

        let response = gateway
            .handle("POST", br#"{"questions": "Q?", "states": "Texas"}"#)
            .await;

        assert_eq!(response.status, 400);
        assert_eq!(response.body["error"], "Invalid request body");
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_handle_mirrors_upstream_status() {
        let details = json!({"type": "error", "error": {"type": "rate_limit_error", "message": "slow down"}});
        let gateway = ComplianceGateway::new(StubClient::failing(429, details.clone()));

        let response = gateway.handle("POST", BODY).await;

        assert_eq!(response.status, 429);
        assert_eq!(response.body["error"], "AI service error");
        assert_eq!(response.body["details"], details);
    }

    #[tokio::test]
    async fn test_handle_malformed_payload() {
        let gateway = ComplianceGateway::new(StubClient::answering("Sorry, I can't do that."));

        let response = gateway.handle("POST", BODY).await;

        assert_eq!(response.status, 500);
        assert_eq!(response.body["error"], "Malformed AI response");
    }

    #[tokio::test]
    async fn test_analyze_validates_typed_request() {
        let stub = StubClient::answering(ANALYSIS);
        let gateway = ComplianceGateway::new(stub.clone());

        let err = gateway
            .analyze(&AnalysisRequest::new("Q?", vec![]))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert_eq!(stub.calls(), 0);
    }
}
