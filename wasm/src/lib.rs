//! WebAssembly module for the Farm Management Platform
//!
//! Provides client-side computation for:
//! - Moisture correction and bag counts at the scale
//! - Load valuation and return on cost
//! - Fuel efficiency and per-crop rollups over locally cached records

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

use shared::{
    CropPrice, FuelRefill, HarvestLoad, InputApplication, MachineryUsage, Plot, RecordId,
    BASIS_MOISTURE_PERCENT,
};

/// Records needed for a per-crop rollup, as cached by the dashboard
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FarmSnapshot {
    plots: Vec<Plot>,
    harvest_loads: Vec<HarvestLoad>,
    input_applications: Vec<InputApplication>,
    machinery_usage: Vec<MachineryUsage>,
    crop_prices: Vec<CropPrice>,
    fuel_refills: Vec<FuelRefill>,
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Zero or negative moisture means "not measured"
fn moisture_reading(moisture_percent: f64) -> Option<Decimal> {
    (moisture_percent > 0.0).then(|| to_decimal(moisture_percent))
}

fn to_js_error(message: String) -> JsValue {
    web_sys::console::error_1(&JsValue::from_str(&message));
    js_sys::Error::new(&message).into()
}

/// Gross weight discounted to the 14% basis moisture
#[wasm_bindgen]
pub fn corrected_weight(gross_weight_kg: f64, moisture_percent: f64) -> f64 {
    to_f64(shared::corrected_weight(
        to_decimal(gross_weight_kg),
        moisture_reading(moisture_percent),
        BASIS_MOISTURE_PERCENT,
    ))
}

/// 60 kg bags in a net weight
#[wasm_bindgen]
pub fn net_bags(net_weight_kg: f64) -> f64 {
    to_f64(shared::net_bags(to_decimal(net_weight_kg)))
}

/// Value of a load at a negotiated price per bag
#[wasm_bindgen]
pub fn harvest_load_value(gross_weight_kg: f64, moisture_percent: f64, price_per_bag: f64) -> f64 {
    to_f64(shared::harvest_load_value(
        to_decimal(gross_weight_kg),
        moisture_reading(moisture_percent),
        Some(to_decimal(price_per_bag)),
    ))
}

fn fuel_efficiency(machine_id: RecordId, usage_json: &str, refills_json: &str) -> Result<f64, String> {
    let usage: Vec<MachineryUsage> =
        serde_json::from_str(usage_json).map_err(|e| format!("Invalid usage JSON: {}", e))?;
    let refills: Vec<FuelRefill> =
        serde_json::from_str(refills_json).map_err(|e| format!("Invalid refills JSON: {}", e))?;

    Ok(to_f64(shared::machine_fuel_efficiency(machine_id, &usage, &refills)))
}

/// Liters refueled per hour operated for one machine
#[wasm_bindgen]
pub fn machine_fuel_efficiency_json(
    machine_id: i64,
    usage_json: &str,
    refills_json: &str,
) -> Result<f64, JsValue> {
    fuel_efficiency(machine_id, usage_json, refills_json).map_err(to_js_error)
}

fn aggregate(snapshot_json: &str) -> Result<String, String> {
    let snapshot: FarmSnapshot = serde_json::from_str(snapshot_json)
        .map_err(|e| format!("Invalid farm snapshot JSON: {}", e))?;

    let financials = shared::aggregate_by_crop(
        &snapshot.plots,
        &snapshot.harvest_loads,
        &snapshot.input_applications,
        &snapshot.machinery_usage,
        &snapshot.crop_prices,
        &snapshot.fuel_refills,
    );

    serde_json::to_string(&financials).map_err(|e| e.to_string())
}

/// Per-crop financials from a JSON farm snapshot
///
/// The snapshot is an object with `plots`, `harvest_loads`,
/// `input_applications`, `machinery_usage`, `crop_prices` and `fuel_refills`
/// arrays; missing arrays count as empty.
#[wasm_bindgen]
pub fn aggregate_by_crop_json(snapshot_json: &str) -> Result<String, JsValue> {
    aggregate(snapshot_json).map_err(to_js_error)
}

/// Profit over cost in percent; undefined when there is no cost
#[wasm_bindgen]
pub fn roi_percent(profit: f64, cost: f64) -> Option<f64> {
    shared::roi_percent(to_decimal(profit), to_decimal(cost)).map(to_f64)
}

/// Whether a moisture reading is a valid percentage
#[wasm_bindgen]
pub fn validate_moisture(moisture_percent: f64) -> bool {
    moisture_percent.is_finite()
        && shared::validate_moisture_percent(to_decimal(moisture_percent)).is_ok()
}
