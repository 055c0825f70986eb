//! Machinery, operating session, and fuel refill models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{MachineStatus, RecordId};

/// A tractor, sprayer, harvester or other piece of equipment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Machine {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub machine_type: String,
    pub model: String,
    pub year: i32,
    pub status: MachineStatus,
}

/// Number of machines currently in service
pub fn active_machine_count(machines: &[Machine]) -> usize {
    machines
        .iter()
        .filter(|machine| machine.status == MachineStatus::Active)
        .count()
}

/// One operating session of a machine on a plot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineryUsage {
    pub id: RecordId,
    pub machinery_id: RecordId,
    #[serde(default)]
    pub machinery_name: String,
    pub plot_id: RecordId,
    #[serde(default)]
    pub plot_name: String,
    pub usage_date: NaiveDate,
    pub hours_used: Decimal,
    /// Operator's estimate; not used in cost attribution
    #[serde(default)]
    pub fuel_consumed: Option<Decimal>,
    #[serde(default)]
    pub notes: String,
}

/// One refueling event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FuelRefill {
    pub id: RecordId,
    pub machinery_id: RecordId,
    #[serde(default)]
    pub machinery_name: String,
    pub refill_date: NaiveDate,
    pub quantity_liters: Decimal,
    #[serde(default)]
    pub price_per_liter: Option<Decimal>,
    /// `quantity_liters × price_per_liter`, absent when no price was given
    #[serde(default)]
    pub total_cost: Option<Decimal>,
    #[serde(default)]
    pub odometer_reading: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(id: RecordId, status: MachineStatus) -> Machine {
        Machine {
            id,
            name: format!("Trator {id}"),
            machine_type: "Trator".to_string(),
            model: "6110J".to_string(),
            year: 2021,
            status,
        }
    }

    #[test]
    fn test_active_machine_count() {
        let fleet = vec![
            machine(1, MachineStatus::Active),
            machine(2, MachineStatus::Maintenance),
            machine(3, MachineStatus::Active),
            machine(4, MachineStatus::Inactive),
        ];
        assert_eq!(active_machine_count(&fleet), 2);
        assert_eq!(active_machine_count(&[]), 0);
    }
}
