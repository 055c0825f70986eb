//! Harvest load models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// One truck delivery from a plot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HarvestLoad {
    pub id: RecordId,
    pub date: NaiveDate,
    pub plot_id: RecordId,
    /// Plot name at the time the load was recorded
    #[serde(default)]
    pub plot_name: String,
    /// Gross weight as weighed at the scale
    pub weight_kg: Decimal,
    /// Absent or zero means basis moisture
    #[serde(default)]
    pub moisture_percent: Option<Decimal>,
    #[serde(default)]
    pub price_per_bag: Option<Decimal>,
    /// Value stamped at entry: net bags × price_per_bag
    #[serde(default)]
    pub total_value: Option<Decimal>,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub truck_plate: String,
}

impl HarvestLoad {
    /// Whether the load carries its own negotiated price
    pub fn has_recorded_price(&self) -> bool {
        matches!(self.price_per_bag, Some(price) if price > Decimal::ZERO)
    }
}
