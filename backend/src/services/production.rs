//! Harvest load service

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    harvest_load_value, newest_first, production_totals, validate_gross_weight,
    validate_moisture_percent, validate_non_negative, HarvestLoad, Plot, ProductionTotals,
    RecordId,
};
use validator::Validate;

use super::{check_field, check_limit};
use crate::error::AppResult;
use crate::repository::Collection;
use crate::storage::KeyValueStore;

#[derive(Clone)]
pub struct ProductionService {
    loads: Collection<HarvestLoad>,
    plots: Collection<Plot>,
}

/// Input for recording or replacing a harvest load
#[derive(Debug, Deserialize, Validate)]
pub struct HarvestLoadInput {
    pub date: NaiveDate,
    pub plot_id: RecordId,
    pub weight_kg: Decimal,
    #[serde(default)]
    pub moisture_percent: Option<Decimal>,
    #[serde(default)]
    pub price_per_bag: Option<Decimal>,
    #[serde(default)]
    #[validate(length(max = 120))]
    pub destination: String,
    #[serde(default)]
    #[validate(length(max = 10))]
    pub truck_plate: String,
}

impl ProductionService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            loads: Collection::new(Arc::clone(&store)),
            plots: Collection::new(store),
        }
    }

    /// Every load, most recently recorded first
    pub async fn list_loads(&self) -> AppResult<Vec<HarvestLoad>> {
        Ok(newest_first(&self.loads.list().await?))
    }

    /// Record a load, stamping the plot name and its value at the given price
    pub async fn save_load(&self, input: HarvestLoadInput, id: Option<RecordId>) -> AppResult<HarvestLoad> {
        input.validate()?;
        check_field(
            "weight_kg",
            validate_gross_weight(input.weight_kg),
            "O peso deve ser maior que zero",
        )?;
        check_limit("weight_kg", input.weight_kg)?;
        if let Some(moisture) = input.moisture_percent {
            check_field(
                "moisture_percent",
                validate_moisture_percent(moisture),
                "A umidade deve estar entre 0 e 100%",
            )?;
        }
        if let Some(price) = input.price_per_bag {
            check_field(
                "price_per_bag",
                validate_non_negative(price),
                "O preço não pode ser negativo",
            )?;
            check_limit("price_per_bag", price)?;
        }

        let plot = self.plots.get(input.plot_id).await?;

        let total_value = input
            .price_per_bag
            .map(|price| harvest_load_value(input.weight_kg, input.moisture_percent, Some(price)));

        let load = HarvestLoad {
            id: 0,
            date: input.date,
            plot_id: plot.id,
            plot_name: plot.name,
            weight_kg: input.weight_kg,
            moisture_percent: input.moisture_percent,
            price_per_bag: input.price_per_bag,
            total_value,
            destination: input.destination.trim().to_string(),
            truck_plate: input.truck_plate.trim().to_uppercase(),
        };
        let saved = self.loads.upsert(load, id).await?;

        tracing::info!(
            "Recorded harvest load {} from {}: {} kg",
            saved.id,
            saved.plot_name,
            saved.weight_kg
        );
        Ok(saved)
    }

    pub async fn delete_load(&self, id: RecordId) -> AppResult<()> {
        self.loads.delete_by_id(id).await?;
        tracing::info!("Deleted harvest load {}", id);
        Ok(())
    }

    pub async fn production_summary(&self) -> AppResult<ProductionTotals> {
        Ok(production_totals(&self.loads.list().await?))
    }
}
