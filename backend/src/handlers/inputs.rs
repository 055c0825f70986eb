//! Input inventory and application HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::RecordId;

use crate::services::inputs::{ApplicationInput, InputItemInput, InputService};
use crate::AppState;

/// List inventory items
pub async fn list_inputs(State(state): State<AppState>) -> impl IntoResponse {
    let service = InputService::new(state.store.clone());

    match service.list_items().await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "inputs": items }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List inventory items below the reorder threshold
pub async fn list_low_stock_inputs(State(state): State<AppState>) -> impl IntoResponse {
    let service = InputService::new(state.store.clone());

    match service.low_stock_items().await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "inputs": items }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Add an inventory item
pub async fn create_input(
    State(state): State<AppState>,
    Json(input): Json<InputItemInput>,
) -> impl IntoResponse {
    let service = InputService::new(state.store.clone());

    match service.save_item(input, None).await {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update an inventory item
pub async fn update_input(
    State(state): State<AppState>,
    Path(input_id): Path<RecordId>,
    Json(input): Json<InputItemInput>,
) -> impl IntoResponse {
    let service = InputService::new(state.store.clone());

    match service.save_item(input, Some(input_id)).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete an inventory item
pub async fn delete_input(
    State(state): State<AppState>,
    Path(input_id): Path<RecordId>,
) -> impl IntoResponse {
    let service = InputService::new(state.store.clone());

    match service.delete_item(input_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// List applications
pub async fn list_applications(State(state): State<AppState>) -> impl IntoResponse {
    let service = InputService::new(state.store.clone());

    match service.list_applications().await {
        Ok(applications) => (
            StatusCode::OK,
            Json(serde_json::json!({ "applications": applications })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record an application and draw down stock
pub async fn create_application(
    State(state): State<AppState>,
    Json(input): Json<ApplicationInput>,
) -> impl IntoResponse {
    let service = InputService::new(state.store.clone());

    match service.save_application(input, None).await {
        Ok(application) => (StatusCode::CREATED, Json(application)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Replace an application, rebalancing stock
pub async fn update_application(
    State(state): State<AppState>,
    Path(application_id): Path<RecordId>,
    Json(input): Json<ApplicationInput>,
) -> impl IntoResponse {
    let service = InputService::new(state.store.clone());

    match service.save_application(input, Some(application_id)).await {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete an application and restore its stock
pub async fn delete_application(
    State(state): State<AppState>,
    Path(application_id): Path<RecordId>,
) -> impl IntoResponse {
    let service = InputService::new(state.store.clone());

    match service.delete_application(application_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
