//! HTTP handler for market price prediction

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use shared::MarketForecast;

use crate::services::AdvisoryService;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MarketRequest {
    #[serde(default)]
    pub crop_type: Option<String>,
}

/// Price forecast for one crop; never fails
pub async fn predict_market(
    State(state): State<AppState>,
    input: Option<Json<MarketRequest>>,
) -> Json<MarketForecast> {
    let request_id = Uuid::new_v4();
    let input = input.map(|Json(input)| input).unwrap_or_default();

    let crop = match input.crop_type.as_deref().map(str::trim) {
        Some(crop) if !crop.is_empty() => crop.to_string(),
        _ => state.config.engine.default_crop.clone(),
    };

    let service = AdvisoryService::new(state.engine.clone(), state.config.engine.seed);
    let forecast = service.market(&crop);

    tracing::info!(
        %request_id,
        crop = %forecast.crop,
        trend = %forecast.trend,
        "Market prediction completed"
    );
    Json(forecast)
}
