//! Route definitions for the AgriWise advisory server

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Advisories
        .route("/disease-detection", post(handlers::detect_disease))
        .route("/weather-prediction", post(handlers::predict_weather))
        .route("/market-prices", post(handlers::predict_market))
        .route("/loan-assessment", post(handlers::assess_loan))
        // Reference tables
        .route("/crops", get(handlers::list_crops))
        .route("/diseases", get(handlers::list_diseases))
}
