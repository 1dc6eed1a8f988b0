//! AWS Lambda entry point for interview question compliance analysis
//!
//! Accepts `POST {"questions": ..., "states": [...]}` and returns the model's
//! analysis as JSON. See `compliance_engine` for the pipeline itself.
//!
//! ## Deployment
//!
//! ```bash
//! # Build for ARM64 (30% cheaper)
//! cargo lambda build --release --arm64 -p analyze-function
//!
//! # Deploy with the API key in the function environment
//! cargo lambda deploy analyze-function --env-var ANTHROPIC_API_KEY=...
//! ```

use analyze_function::{handler, VERSION};
use compliance_engine::{ComplianceGateway, GatewayConfig};
use lambda_http::{run, service_fn, Error, Request};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // CloudWatch-friendly output: JSON, no colors, no timestamps
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_current_span(false)
        .without_time()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("analyze_function=info".parse()?)
                .add_directive("compliance_engine=info".parse()?),
        )
        .init();

    let config = GatewayConfig::from_env()?;
    info!(version = VERSION, model = %config.model, "Starting analyze Lambda");

    let gateway = ComplianceGateway::anthropic(config);

    run(service_fn(move |event: Request| {
        let gateway = gateway.clone();
        async move { handler(&gateway, event).await }
    }))
    .await
}
