//! Machinery, usage and fuel HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::RecordId;

use crate::services::machinery::{MachineInput, MachineryService, RefillInput, UsageInput};
use crate::AppState;

// ============================================================================
// Machines
// ============================================================================

/// List all machines
pub async fn list_machines(State(state): State<AppState>) -> impl IntoResponse {
    let service = MachineryService::new(state.store.clone());

    match service.list_machines().await {
        Ok(machines) => {
            (StatusCode::OK, Json(serde_json::json!({ "machines": machines }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Register a machine
pub async fn create_machine(
    State(state): State<AppState>,
    Json(input): Json<MachineInput>,
) -> impl IntoResponse {
    let service = MachineryService::new(state.store.clone());

    match service.save_machine(input, None).await {
        Ok(machine) => (StatusCode::CREATED, Json(machine)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a machine
pub async fn update_machine(
    State(state): State<AppState>,
    Path(machine_id): Path<RecordId>,
    Json(input): Json<MachineInput>,
) -> impl IntoResponse {
    let service = MachineryService::new(state.store.clone());

    match service.save_machine(input, Some(machine_id)).await {
        Ok(machine) => (StatusCode::OK, Json(machine)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a machine
pub async fn delete_machine(
    State(state): State<AppState>,
    Path(machine_id): Path<RecordId>,
) -> impl IntoResponse {
    let service = MachineryService::new(state.store.clone());

    match service.delete_machine(machine_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Liters refueled per hour operated for one machine
pub async fn get_fuel_efficiency(
    State(state): State<AppState>,
    Path(machine_id): Path<RecordId>,
) -> impl IntoResponse {
    let service = MachineryService::new(state.store.clone());

    match service.fuel_efficiency(machine_id).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => e.into_response(),
    }
}

// ============================================================================
// Usage sessions
// ============================================================================

/// List all operating sessions
pub async fn list_usage(State(state): State<AppState>) -> impl IntoResponse {
    let service = MachineryService::new(state.store.clone());

    match service.list_usage().await {
        Ok(usage) => (StatusCode::OK, Json(serde_json::json!({ "usage": usage }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Log an operating session
pub async fn create_usage(
    State(state): State<AppState>,
    Json(input): Json<UsageInput>,
) -> impl IntoResponse {
    let service = MachineryService::new(state.store.clone());

    match service.save_usage(input, None).await {
        Ok(usage) => (StatusCode::CREATED, Json(usage)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update an operating session
pub async fn update_usage(
    State(state): State<AppState>,
    Path(usage_id): Path<RecordId>,
    Json(input): Json<UsageInput>,
) -> impl IntoResponse {
    let service = MachineryService::new(state.store.clone());

    match service.save_usage(input, Some(usage_id)).await {
        Ok(usage) => (StatusCode::OK, Json(usage)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete an operating session
pub async fn delete_usage(
    State(state): State<AppState>,
    Path(usage_id): Path<RecordId>,
) -> impl IntoResponse {
    let service = MachineryService::new(state.store.clone());

    match service.delete_usage(usage_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

// ============================================================================
// Fuel refills
// ============================================================================

/// List all refills
pub async fn list_refills(State(state): State<AppState>) -> impl IntoResponse {
    let service = MachineryService::new(state.store.clone());

    match service.list_refills().await {
        Ok(refills) => {
            (StatusCode::OK, Json(serde_json::json!({ "refills": refills }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Record a refill
pub async fn create_refill(
    State(state): State<AppState>,
    Json(input): Json<RefillInput>,
) -> impl IntoResponse {
    let service = MachineryService::new(state.store.clone());

    match service.save_refill(input, None).await {
        Ok(refill) => (StatusCode::CREATED, Json(refill)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a refill
pub async fn update_refill(
    State(state): State<AppState>,
    Path(refill_id): Path<RecordId>,
    Json(input): Json<RefillInput>,
) -> impl IntoResponse {
    let service = MachineryService::new(state.store.clone());

    match service.save_refill(input, Some(refill_id)).await {
        Ok(refill) => (StatusCode::OK, Json(refill)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a refill
pub async fn delete_refill(
    State(state): State<AppState>,
    Path(refill_id): Path<RecordId>,
) -> impl IntoResponse {
    let service = MachineryService::new(state.store.clone());

    match service.delete_refill(refill_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Fleet fuel spending and cost per machine hour
pub async fn get_fuel_summary(State(state): State<AppState>) -> impl IntoResponse {
    let service = MachineryService::new(state.store.clone());

    match service.fleet_fuel_report().await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => e.into_response(),
    }
}
