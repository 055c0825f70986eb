//! Route definitions for the Farm Management Platform

use axum::{
    routing::{get, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/plots", plot_routes())
        .nest("/crop-prices", crop_price_routes())
        .nest("/machines", machine_routes())
        .nest("/machinery-usage", usage_routes())
        .nest("/fuel-refills", refill_routes())
        .nest("/inputs", input_routes())
        .nest("/applications", application_routes())
        .nest("/harvest-loads", harvest_load_routes())
        .route("/dashboard", get(handlers::get_dashboard))
}

/// Plot management routes
fn plot_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_plots).post(handlers::create_plot))
        .route(
            "/:plot_id",
            put(handlers::update_plot).delete(handlers::delete_plot),
        )
        .route("/:plot_id/statistics", get(handlers::get_plot_statistics))
}

/// Crop price routes
fn crop_price_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_crop_prices).put(handlers::upsert_crop_price),
        )
        .route("/board", get(handlers::get_price_board))
}

/// Machine routes
fn machine_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_machines).post(handlers::create_machine))
        .route(
            "/:machine_id",
            put(handlers::update_machine).delete(handlers::delete_machine),
        )
        .route(
            "/:machine_id/fuel-efficiency",
            get(handlers::get_fuel_efficiency),
        )
}

/// Machinery usage routes
fn usage_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_usage).post(handlers::create_usage))
        .route(
            "/:usage_id",
            put(handlers::update_usage).delete(handlers::delete_usage),
        )
}

/// Fuel refill routes
fn refill_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_refills).post(handlers::create_refill))
        .route("/summary", get(handlers::get_fuel_summary))
        .route(
            "/:refill_id",
            put(handlers::update_refill).delete(handlers::delete_refill),
        )
}

/// Input inventory routes
fn input_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_inputs).post(handlers::create_input))
        .route("/low-stock", get(handlers::list_low_stock_inputs))
        .route(
            "/:input_id",
            put(handlers::update_input).delete(handlers::delete_input),
        )
}

/// Input application routes
fn application_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_applications).post(handlers::create_application),
        )
        .route(
            "/:application_id",
            put(handlers::update_application).delete(handlers::delete_application),
        )
}

/// Harvest load routes
fn harvest_load_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_harvest_loads).post(handlers::create_harvest_load),
        )
        .route("/summary", get(handlers::get_production_summary))
        .route(
            "/:load_id",
            put(handlers::update_harvest_load).delete(handlers::delete_harvest_load),
        )
}
