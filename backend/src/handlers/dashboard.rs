//! Dashboard HTTP handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::services::DashboardService;
use crate::AppState;

/// Per-crop financials with farm totals
pub async fn get_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let service = DashboardService::new(state.store.clone());

    match service.report().await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => e.into_response(),
    }
}
