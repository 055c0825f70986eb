//! Harvest load HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::RecordId;

use crate::services::production::{HarvestLoadInput, ProductionService};
use crate::AppState;

/// List harvest loads, newest first
pub async fn list_harvest_loads(State(state): State<AppState>) -> impl IntoResponse {
    let service = ProductionService::new(state.store.clone());

    match service.list_loads().await {
        Ok(loads) => (StatusCode::OK, Json(serde_json::json!({ "loads": loads }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a harvest load
pub async fn create_harvest_load(
    State(state): State<AppState>,
    Json(input): Json<HarvestLoadInput>,
) -> impl IntoResponse {
    let service = ProductionService::new(state.store.clone());

    match service.save_load(input, None).await {
        Ok(load) => (StatusCode::CREATED, Json(load)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a harvest load
pub async fn update_harvest_load(
    State(state): State<AppState>,
    Path(load_id): Path<RecordId>,
    Json(input): Json<HarvestLoadInput>,
) -> impl IntoResponse {
    let service = ProductionService::new(state.store.clone());

    match service.save_load(input, Some(load_id)).await {
        Ok(load) => (StatusCode::OK, Json(load)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a harvest load
pub async fn delete_harvest_load(
    State(state): State<AppState>,
    Path(load_id): Path<RecordId>,
) -> impl IntoResponse {
    let service = ProductionService::new(state.store.clone());

    match service.delete_load(load_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Production totals across all loads
pub async fn get_production_summary(State(state): State<AppState>) -> impl IntoResponse {
    let service = ProductionService::new(state.store.clone());

    match service.production_summary().await {
        Ok(totals) => (StatusCode::OK, Json(totals)).into_response(),
        Err(e) => e.into_response(),
    }
}
