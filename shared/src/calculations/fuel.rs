//! Fuel and machine-hour aggregates

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ratio_or_zero, saturating_sum};
use crate::models::{FuelRefill, MachineryUsage};
use crate::types::RecordId;

/// Refueling and operating totals of one machine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineFuelSummary {
    pub machine_id: RecordId,
    pub hours_operated: Decimal,
    pub liters_refueled: Decimal,
    /// Liters refueled per hour operated
    pub liters_per_hour: Decimal,
}

/// Fleet-wide fuel spending
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FleetFuelTotals {
    pub refill_count: usize,
    pub total_liters: Decimal,
    /// Refills without a price contribute nothing
    pub total_cost: Decimal,
}

/// Hours operated across every usage session
pub fn total_machine_hours(usage: &[MachineryUsage]) -> Decimal {
    saturating_sum(usage.iter().map(|session| session.hours_used))
}

/// Fuel spending and volume across the fleet
pub fn fleet_fuel_totals(refills: &[FuelRefill]) -> FleetFuelTotals {
    FleetFuelTotals {
        refill_count: refills.len(),
        total_liters: saturating_sum(refills.iter().map(|refill| refill.quantity_liters)),
        total_cost: saturating_sum(
            refills
                .iter()
                .map(|refill| refill.total_cost.unwrap_or(Decimal::ZERO)),
        ),
    }
}

/// Fleet-wide fuel cost per operated hour, zero when no hours were logged
///
/// One rate for the whole fleet: crops are charged fuel in proportion to the
/// machine hours logged on their plots, regardless of which machine burned it.
pub fn fuel_cost_per_hour(refills: &[FuelRefill], usage: &[MachineryUsage]) -> Decimal {
    ratio_or_zero(fleet_fuel_totals(refills).total_cost, total_machine_hours(usage))
}

/// Refueling versus operating totals for one machine
pub fn machine_fuel_summary(
    machine_id: RecordId,
    usage: &[MachineryUsage],
    refills: &[FuelRefill],
) -> MachineFuelSummary {
    let hours_operated = saturating_sum(
        usage
            .iter()
            .filter(|session| session.machinery_id == machine_id)
            .map(|session| session.hours_used),
    );
    let liters_refueled = saturating_sum(
        refills
            .iter()
            .filter(|refill| refill.machinery_id == machine_id)
            .map(|refill| refill.quantity_liters),
    );

    MachineFuelSummary {
        machine_id,
        hours_operated,
        liters_refueled,
        liters_per_hour: ratio_or_zero(liters_refueled, hours_operated),
    }
}

/// Liters refueled divided by hours operated for one machine, zero without hours
///
/// This measures refueling cadence, not metered consumption.
pub fn machine_fuel_efficiency(
    machine_id: RecordId,
    usage: &[MachineryUsage],
    refills: &[FuelRefill],
) -> Decimal {
    machine_fuel_summary(machine_id, usage, refills).liters_per_hour
}
