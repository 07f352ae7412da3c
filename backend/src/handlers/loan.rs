//! HTTP handler for loan assessment

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use uuid::Uuid;

use shared::{LoanAssessment, RawFarmerProfile};

use crate::error::AppResult;
use crate::services::AdvisoryService;
use crate::AppState;

/// Score a farmer's loan application
pub async fn assess_loan(
    State(state): State<AppState>,
    input: Result<Json<RawFarmerProfile>, JsonRejection>,
) -> AppResult<Json<LoanAssessment>> {
    let request_id = Uuid::new_v4();
    let Json(input) = input?;

    let service = AdvisoryService::new(state.engine.clone(), state.config.engine.seed);
    let assessment = service.loan(&input)?;

    tracing::info!(
        %request_id,
        score = assessment.score,
        risk = %assessment.risk_level,
        "Loan assessment completed"
    );
    Ok(Json(assessment))
}
