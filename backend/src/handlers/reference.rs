//! Read-only views of the reference tables

use axum::{extract::State, Json};

use shared::{CropPriceTable, DiseaseCatalog};

use crate::AppState;

pub async fn list_crops(State(state): State<AppState>) -> Json<CropPriceTable> {
    Json(state.engine.reference().crop_prices.clone())
}

pub async fn list_diseases(State(state): State<AppState>) -> Json<DiseaseCatalog> {
    Json(state.engine.reference().diseases.clone())
}
