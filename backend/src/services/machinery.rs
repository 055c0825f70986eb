//! Machinery, operating session and fuel refill service

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    active_machine_count, fleet_fuel_totals, fuel_cost_per_hour, machine_fuel_summary, refill_total_cost,
    total_machine_hours, validate_fuel_quantity, validate_hours_used, validate_machine_year,
    validate_non_negative, FleetFuelTotals, FuelRefill, Machine, MachineFuelSummary,
    MachineStatus, MachineryUsage, Plot, RecordId,
};
use validator::Validate;

use super::{check_field, check_limit, non_blank};
use crate::error::AppResult;
use crate::repository::Collection;
use crate::storage::KeyValueStore;

#[derive(Clone)]
pub struct MachineryService {
    machines: Collection<Machine>,
    usage: Collection<MachineryUsage>,
    refills: Collection<FuelRefill>,
    plots: Collection<Plot>,
}

/// Input for creating or replacing a machine
#[derive(Debug, Deserialize, Validate)]
pub struct MachineInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 60))]
    pub machine_type: String,
    #[serde(default)]
    pub model: String,
    pub year: i32,
    #[serde(default = "default_status")]
    pub status: MachineStatus,
}

fn default_status() -> MachineStatus {
    MachineStatus::Active
}

/// Input for logging an operating session
#[derive(Debug, Deserialize, Validate)]
pub struct UsageInput {
    pub machinery_id: RecordId,
    pub plot_id: RecordId,
    pub usage_date: NaiveDate,
    pub hours_used: Decimal,
    #[serde(default)]
    pub fuel_consumed: Option<Decimal>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub notes: String,
}

/// Input for recording a refill
#[derive(Debug, Deserialize, Validate)]
pub struct RefillInput {
    pub machinery_id: RecordId,
    pub refill_date: NaiveDate,
    pub quantity_liters: Decimal,
    #[serde(default)]
    pub price_per_liter: Option<Decimal>,
    #[serde(default)]
    pub odometer_reading: Option<Decimal>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Fleet-wide fuel spending together with the rate charged per machine hour
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FleetFuelReport {
    #[serde(flatten)]
    pub totals: FleetFuelTotals,
    pub total_machine_hours: Decimal,
    pub fuel_cost_per_hour: Decimal,
    /// Machines with status `Active`
    pub active_machines: usize,
}

impl MachineryService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            machines: Collection::new(Arc::clone(&store)),
            usage: Collection::new(Arc::clone(&store)),
            refills: Collection::new(Arc::clone(&store)),
            plots: Collection::new(store),
        }
    }

    // ------------------------------------------------------------------------
    // Machines
    // ------------------------------------------------------------------------

    pub async fn list_machines(&self) -> AppResult<Vec<Machine>> {
        self.machines.list().await
    }

    pub async fn save_machine(&self, input: MachineInput, id: Option<RecordId>) -> AppResult<Machine> {
        input.validate()?;
        check_field(
            "year",
            validate_machine_year(input.year),
            "O ano deve estar entre 1900 e 2100",
        )?;

        let machine = Machine {
            id: 0,
            name: input.name.trim().to_string(),
            machine_type: input.machine_type.trim().to_string(),
            model: input.model.trim().to_string(),
            year: input.year,
            status: input.status,
        };
        let saved = self.machines.upsert(machine, id).await?;

        tracing::info!("Saved machine {} ({}, {})", saved.id, saved.name, saved.status);
        Ok(saved)
    }

    /// Delete a machine; its usage sessions and refills are kept
    pub async fn delete_machine(&self, id: RecordId) -> AppResult<()> {
        self.machines.delete_by_id(id).await?;
        tracing::info!("Deleted machine {}", id);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Operating sessions
    // ------------------------------------------------------------------------

    pub async fn list_usage(&self) -> AppResult<Vec<MachineryUsage>> {
        self.usage.list().await
    }

    /// Log a session, stamping the current machine and plot names
    pub async fn save_usage(&self, input: UsageInput, id: Option<RecordId>) -> AppResult<MachineryUsage> {
        input.validate()?;
        check_field(
            "hours_used",
            validate_hours_used(input.hours_used),
            "As horas trabalhadas devem ser maiores que zero",
        )?;
        check_limit("hours_used", input.hours_used)?;
        if let Some(fuel) = input.fuel_consumed {
            check_field(
                "fuel_consumed",
                validate_non_negative(fuel),
                "O consumo de combustível não pode ser negativo",
            )?;
            check_limit("fuel_consumed", fuel)?;
        }

        let machine = self.machines.get(input.machinery_id).await?;
        let plot = self.plots.get(input.plot_id).await?;

        let session = MachineryUsage {
            id: 0,
            machinery_id: machine.id,
            machinery_name: machine.name,
            plot_id: plot.id,
            plot_name: plot.name,
            usage_date: input.usage_date,
            hours_used: input.hours_used,
            fuel_consumed: input.fuel_consumed,
            notes: input.notes.trim().to_string(),
        };
        let saved = self.usage.upsert(session, id).await?;

        tracing::info!(
            "Logged {} h of {} on {}",
            saved.hours_used,
            saved.machinery_name,
            saved.plot_name
        );
        Ok(saved)
    }

    pub async fn delete_usage(&self, id: RecordId) -> AppResult<()> {
        self.usage.delete_by_id(id).await?;
        tracing::info!("Deleted machinery usage {}", id);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Fuel refills
    // ------------------------------------------------------------------------

    pub async fn list_refills(&self) -> AppResult<Vec<FuelRefill>> {
        self.refills.list().await
    }

    /// Record a refill, stamping the machine name and the total cost
    pub async fn save_refill(&self, input: RefillInput, id: Option<RecordId>) -> AppResult<FuelRefill> {
        input.validate()?;
        check_field(
            "quantity_liters",
            validate_fuel_quantity(input.quantity_liters),
            "A quantidade de combustível deve ser maior que zero",
        )?;
        check_limit("quantity_liters", input.quantity_liters)?;
        if let Some(price) = input.price_per_liter {
            check_field(
                "price_per_liter",
                validate_non_negative(price),
                "O preço por litro não pode ser negativo",
            )?;
            check_limit("price_per_liter", price)?;
        }
        if let Some(reading) = input.odometer_reading {
            check_limit("odometer_reading", reading)?;
        }

        let machine = self.machines.get(input.machinery_id).await?;

        let refill = FuelRefill {
            id: 0,
            machinery_id: machine.id,
            machinery_name: machine.name,
            refill_date: input.refill_date,
            quantity_liters: input.quantity_liters,
            price_per_liter: input.price_per_liter,
            total_cost: refill_total_cost(input.quantity_liters, input.price_per_liter),
            odometer_reading: input.odometer_reading,
            notes: non_blank(input.notes),
        };
        let saved = self.refills.upsert(refill, id).await?;

        tracing::info!(
            "Recorded {} L refill for {}",
            saved.quantity_liters,
            saved.machinery_name
        );
        Ok(saved)
    }

    pub async fn delete_refill(&self, id: RecordId) -> AppResult<()> {
        self.refills.delete_by_id(id).await?;
        tracing::info!("Deleted fuel refill {}", id);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Fuel analytics
    // ------------------------------------------------------------------------

    /// Liters refueled per hour operated for one machine
    pub async fn fuel_efficiency(&self, machine_id: RecordId) -> AppResult<MachineFuelSummary> {
        let machine = self.machines.get(machine_id).await?;
        let (usage, refills) = tokio::try_join!(self.usage.list(), self.refills.list())?;
        Ok(machine_fuel_summary(machine.id, &usage, &refills))
    }

    pub async fn fleet_fuel_report(&self) -> AppResult<FleetFuelReport> {
        let (machines, usage, refills) = tokio::try_join!(
            self.machines.list(),
            self.usage.list(),
            self.refills.list()
        )?;
        Ok(FleetFuelReport {
            totals: fleet_fuel_totals(&refills),
            total_machine_hours: total_machine_hours(&usage),
            fuel_cost_per_hour: fuel_cost_per_hour(&refills, &usage),
            active_machines: active_machine_count(&machines),
        })
    }
}
