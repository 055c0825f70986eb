//! Crop price HTTP handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::services::crop_price::{CropPriceInput, CropPriceService};
use crate::AppState;

/// List the stored crop prices
pub async fn list_crop_prices(State(state): State<AppState>) -> impl IntoResponse {
    let service = CropPriceService::new(state.store.clone());

    match service.list_prices().await {
        Ok(prices) => {
            (StatusCode::OK, Json(serde_json::json!({ "crop_prices": prices }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Set the price of one crop
pub async fn upsert_crop_price(
    State(state): State<AppState>,
    Json(input): Json<CropPriceInput>,
) -> impl IntoResponse {
    let service = CropPriceService::new(state.store.clone());

    match service.save_price(input).await {
        Ok(price) => (StatusCode::OK, Json(price)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Market crops with their current prices
pub async fn get_price_board(State(state): State<AppState>) -> impl IntoResponse {
    let service = CropPriceService::new(state.store.clone());

    match service.price_board().await {
        Ok(board) => (StatusCode::OK, Json(serde_json::json!({ "board": board }))).into_response(),
        Err(e) => e.into_response(),
    }
}
