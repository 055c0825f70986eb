//! Plot management HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::RecordId;

use crate::services::plot::{PlotInput, PlotService};
use crate::AppState;

/// List all plots
pub async fn list_plots(State(state): State<AppState>) -> impl IntoResponse {
    let service = PlotService::new(state.store.clone());

    match service.list_plots().await {
        Ok(plots) => (StatusCode::OK, Json(serde_json::json!({ "plots": plots }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new plot
pub async fn create_plot(
    State(state): State<AppState>,
    Json(input): Json<PlotInput>,
) -> impl IntoResponse {
    let service = PlotService::new(state.store.clone());

    match service.save_plot(input, None).await {
        Ok(plot) => (StatusCode::CREATED, Json(plot)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a plot
pub async fn update_plot(
    State(state): State<AppState>,
    Path(plot_id): Path<RecordId>,
    Json(input): Json<PlotInput>,
) -> impl IntoResponse {
    let service = PlotService::new(state.store.clone());

    match service.save_plot(input, Some(plot_id)).await {
        Ok(plot) => (StatusCode::OK, Json(plot)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a plot
pub async fn delete_plot(
    State(state): State<AppState>,
    Path(plot_id): Path<RecordId>,
) -> impl IntoResponse {
    let service = PlotService::new(state.store.clone());

    match service.delete_plot(plot_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get plot statistics
pub async fn get_plot_statistics(
    State(state): State<AppState>,
    Path(plot_id): Path<RecordId>,
) -> impl IntoResponse {
    let service = PlotService::new(state.store.clone());

    match service.plot_statistics(plot_id).await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => e.into_response(),
    }
}
