//! Upstream configuration
//!
//! The API key is passed into the client explicitly; nothing in the engine
//! reads the environment except `GatewayConfig::from_env`.

use std::fmt;

/// Default Anthropic Messages endpoint
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Default model used for analysis
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default response token budget
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Anthropic API version header value
pub const DEFAULT_ANTHROPIC_VERSION: &str = "2023-06-01";

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Configuration for the upstream completion API
#[derive(Clone)]
pub struct GatewayConfig {
    /// Secret API key sent as `x-api-key`
    pub api_key: String,

    /// Messages endpoint URL
    pub api_url: String,

    /// Model identifier
    pub model: String,

    /// Maximum tokens in the model's response
    pub max_tokens: u32,

    /// `anthropic-version` header value
    pub anthropic_version: String,
}

impl GatewayConfig {
    /// Create a config with defaults for everything but the key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            anthropic_version: DEFAULT_ANTHROPIC_VERSION.to_string(),
        }
    }

    /// Override the endpoint URL (mock servers, proxies)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Override the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Load configuration from environment variables
    ///
    /// Expected variables:
    /// - ANTHROPIC_API_KEY: API key (required)
    /// - ANTHROPIC_API_URL: Messages endpoint (default: Anthropic production)
    /// - ANTHROPIC_MODEL: Model identifier
    /// - ANTHROPIC_MAX_TOKENS: Response token budget
    /// - ANTHROPIC_VERSION: API version header
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("ANTHROPIC_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingVar("ANTHROPIC_API_KEY"))?;

        let mut config = Self::new(api_key);

        if let Some(url) = lookup("ANTHROPIC_API_URL") {
            config.api_url = url;
        }
        if let Some(model) = lookup("ANTHROPIC_MODEL") {
            config.model = model;
        }
        if let Some(raw) = lookup("ANTHROPIC_MAX_TOKENS") {
            config.max_tokens = raw
                .trim()
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue {
                    name: "ANTHROPIC_MAX_TOKENS",
                    value: raw,
                })?;
        }
        if let Some(version) = lookup("ANTHROPIC_VERSION") {
            config.anthropic_version = version;
        }

        Ok(config)
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("anthropic_version", &self.anthropic_version)
            .finish()
    }
}
