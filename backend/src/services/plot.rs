//! Plot management service

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{plot_statistics, validate_area_hectares, HarvestLoad, Plot, PlotStatistics, RecordId};
use validator::Validate;

use super::{check_field, check_limit};
use crate::error::AppResult;
use crate::repository::Collection;
use crate::storage::KeyValueStore;

/// Plot service for managing farm plots
#[derive(Clone)]
pub struct PlotService {
    plots: Collection<Plot>,
    harvest_loads: Collection<HarvestLoad>,
}

/// Input for creating or replacing a plot
#[derive(Debug, Deserialize, Validate)]
pub struct PlotInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub area_hectares: Decimal,
    #[serde(default)]
    pub crop_type: String,
    #[serde(default)]
    pub season: String,
}

impl PlotService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            plots: Collection::new(Arc::clone(&store)),
            harvest_loads: Collection::new(store),
        }
    }

    /// All plots, seeded with the two default plots on a fresh store
    pub async fn list_plots(&self) -> AppResult<Vec<Plot>> {
        self.plots.list().await
    }

    /// Create a plot, or replace the plot at `id`
    pub async fn save_plot(&self, input: PlotInput, id: Option<RecordId>) -> AppResult<Plot> {
        input.validate()?;
        check_field(
            "area_hectares",
            validate_area_hectares(input.area_hectares),
            "A área deve ser maior que zero",
        )?;
        check_limit("area_hectares", input.area_hectares)?;

        let plot = Plot::new(
            input.name.trim(),
            input.area_hectares,
            input.crop_type.trim(),
            input.season.trim(),
        );
        let saved = self.plots.upsert(plot, id).await?;

        tracing::info!("Saved plot {} ({})", saved.id, saved.name);
        Ok(saved)
    }

    /// Delete a plot; loads, usage and applications referencing it are kept
    pub async fn delete_plot(&self, id: RecordId) -> AppResult<()> {
        self.plots.delete_by_id(id).await?;
        tracing::info!("Deleted plot {}", id);
        Ok(())
    }

    /// Net bags and productivity of one plot
    pub async fn plot_statistics(&self, id: RecordId) -> AppResult<PlotStatistics> {
        let plot = self.plots.get(id).await?;
        let loads = self.harvest_loads.list().await?;
        Ok(plot_statistics(&plot, &loads))
    }
}
