//! HTTP handler for disease detection

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shared::{DecodeError, DiseaseAssessment};

use crate::error::AppResult;
use crate::services::{AdvisoryService, DiseaseService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DiseaseRequest {
    /// Base64 image, optionally as a data URL
    #[serde(default)]
    pub image: Option<String>,
}

/// Classify a crop photo
pub async fn detect_disease(
    State(state): State<AppState>,
    input: Result<Json<DiseaseRequest>, JsonRejection>,
) -> AppResult<Json<DiseaseAssessment>> {
    let request_id = Uuid::new_v4();
    let Json(input) = input?;
    let image = input.image.ok_or(DecodeError::Empty)?;

    let rng = AdvisoryService::new(state.engine.clone(), state.config.engine.seed).request_rng();
    let service = DiseaseService::new(
        state.engine.clone(),
        state.config.engine.max_image_bytes,
        state.config.engine.decode_timeout(),
    );
    let assessment = service.assess(&image, rng).await?;

    tracing::info!(
        %request_id,
        disease = %assessment.disease,
        confidence = assessment.confidence,
        "Disease detection completed"
    );
    Ok(Json(assessment))
}
