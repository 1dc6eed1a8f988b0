//! Compliance Analysis Server
//!
//! Serves the interview question compliance analysis over plain HTTP, for
//! local development against the web form and for self-hosted deployments
//! where the Lambda function is not used.
//!
//! - `POST /api/analyze` (also mounted at the Netlify function path)
//! - `GET /health`

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use compliance_engine::{ComplianceGateway, GatewayConfig};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;

use api::{handle_analyze, handle_health, handle_method_not_allowed};

/// Command-line arguments for the compliance server
#[derive(Parser, Debug)]
#[command(name = "compliance-server")]
#[command(about = "Interview question compliance analysis server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "2")]
    rate_limit: u32,

    /// Model override (defaults to ANTHROPIC_MODEL or the built-in default)
    #[arg(long)]
    model: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub gateway: ComplianceGateway,
}

/// Routes without middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route(
            "/api/analyze",
            post(handle_analyze).fallback(handle_method_not_allowed),
        )
        .route(
            "/.netlify/functions/analyze",
            post(handle_analyze).fallback(handle_method_not_allowed),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = GatewayConfig::from_env()?;
    if let Some(model) = args.model {
        config = config.with_model(model);
    }
    info!(model = %config.model, "Starting compliance server on {}:{}", args.host, args.port);

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .ok_or_else(|| anyhow!("rate limit must be greater than zero"))?,
    );

    let state = AppState {
        gateway: ComplianceGateway::anthropic(config),
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = build_router(state)
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
