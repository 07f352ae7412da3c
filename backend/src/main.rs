//! AgriWise Advisory Server
//!
//! Serves the disease, weather, market and loan advisories to the farmer
//! dashboard over a JSON API.

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shared::AdvisoryEngine;

mod config;
mod error;
mod handlers;
mod routes;
mod services;

pub use config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AdvisoryEngine>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "agriwise_server=debug,tower_http=debug,shared=info".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting AgriWise Advisory Server");
    tracing::info!("Environment: {}", config.environment);

    // Load reference tables
    let reference = services::load_reference(
        config.engine.reference_path.as_deref(),
        config.engine.request_timeout(),
    )
    .await?;
    let engine = AdvisoryEngine::with_classifier_seed(reference, config.engine.classifier_seed);
    tracing::info!("Advisory engine ready: {:?}", engine);

    if let Some(seed) = config.engine.seed {
        tracing::warn!("Fixed random seed {} configured; advisories are reproducible", seed);
    }

    // Create application state
    let state = AppState {
        engine: Arc::new(engine),
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = config.bind_address();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.config.engine.max_body_bytes()))
        .layer(TimeoutLayer::new(state.config.engine.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "AgriWise Smart Farming API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
