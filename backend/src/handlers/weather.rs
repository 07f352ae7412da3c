//! HTTP handler for weather prediction

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use shared::WeatherForecast;

use crate::services::AdvisoryService;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct WeatherRequest {
    #[serde(default)]
    pub location: Option<String>,
}

/// Seven-day forecast with farming advice
pub async fn predict_weather(
    State(state): State<AppState>,
    input: Option<Json<WeatherRequest>>,
) -> Json<WeatherForecast> {
    let request_id = Uuid::new_v4();
    let input = input.map(|Json(input)| input).unwrap_or_default();

    let location = match input.location.as_deref().map(str::trim) {
        Some(location) if !location.is_empty() => location.to_string(),
        _ => state.config.engine.default_location.clone(),
    };

    let service = AdvisoryService::new(state.engine.clone(), state.config.engine.seed);
    let forecast = service.weather(&location);

    tracing::info!(%request_id, location = %forecast.location, "Weather prediction completed");
    Json(forecast)
}
