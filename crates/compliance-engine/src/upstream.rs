//! Upstream completion client
//!
//! `CompletionClient` is the seam between the gateway and the network: the
//! production implementation talks to the Anthropic Messages API, tests plug
//! in canned responses.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, instrument, trace};

use crate::config::GatewayConfig;
use crate::error::GatewayError;

/// A completion API that answers a single prompt with a raw JSON response
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send `prompt` upstream and return the decoded response body
    async fn complete(&self, prompt: &str) -> Result<Value, GatewayError>;
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// Anthropic Messages API client
pub struct AnthropicClient {
    config: GatewayConfig,
    http: reqwest::Client,
}

impl AnthropicClient {
    /// Create a new client from explicit configuration
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Configured model identifier
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    #[instrument(skip(self, prompt), fields(model = %self.config.model))]
    async fn complete(&self, prompt: &str) -> Result<Value, GatewayError> {
        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        debug!(prompt_chars = prompt.len(), "Calling Anthropic Messages API");
        let response = self
            .http
            .post(&self.config.api_url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", &self.config.anthropic_version)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .inspect_err(|e| error!(error = %e, "Anthropic API unreachable"))?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Error bodies are JSON in practice, but proxies may answer with text/html
            let details = serde_json::from_str(&text).unwrap_or(Value::String(text));
            error!(status = status.as_u16(), details = %details, "Anthropic API error");
            return Err(GatewayError::UpstreamUnavailable {
                status: status.as_u16(),
                details,
            });
        }

        trace!(body = %text, "Anthropic API response");
        serde_json::from_str(&text).map_err(|e| {
            GatewayError::MalformedUpstreamPayload(format!("upstream response is not JSON: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let request = MessagesRequest {
            model: "claude-sonnet-4-20250514",
            max_tokens: 4000,
            messages: [Message {
                role: "user",
                content: "Analyze this",
            }],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "claude-sonnet-4-20250514",
                "max_tokens": 4000,
                "messages": [{"role": "user", "content": "Analyze this"}]
            })
        );
    }

    #[test]
    fn test_client_reports_model() {
        let client = AnthropicClient::new(GatewayConfig::new("sk-test").with_model("claude-x"));
        assert_eq!(client.model(), "claude-x");
    }
}
