//! Agrochemical input inventory and application models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{RecordId, Unit, LOW_STOCK_THRESHOLD};

/// An agrochemical held in inventory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputItem {
    pub id: RecordId,
    pub name: String,
    pub unit: Unit,
    pub price_per_unit: Decimal,
    pub stock: Decimal,
}

impl InputItem {
    /// Whether stock has fallen below the reorder threshold
    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }
}

/// One input line of an application, with name and price captured at entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApplicationItem {
    pub input_id: RecordId,
    pub input_name: String,
    pub quantity: Decimal,
    pub unit: Unit,
    pub total_cost: Decimal,
}

/// One spraying / application event on a plot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputApplication {
    pub id: RecordId,
    pub date: NaiveDate,
    pub plot_id: RecordId,
    #[serde(default)]
    pub plot_name: String,
    pub machine_id: RecordId,
    #[serde(default)]
    pub machine_name: String,
    pub items: Vec<ApplicationItem>,
    pub total_application_cost: Decimal,
}

impl InputApplication {
    /// Quantity of `input_id` consumed by this application, summed across its lines
    pub fn quantity_of(&self, input_id: RecordId) -> Decimal {
        self.items
            .iter()
            .filter(|item| item.input_id == input_id)
            .map(|item| item.quantity)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}
