//! Farm dashboard report
//!
//! Reads every collection at once and rolls them up per crop.

use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use shared::{
    aggregate_by_crop, farm_totals, fuel_cost_per_hour, roi_percent, CropFinancials, CropSummary,
    FarmTotals, FuelRefill, HarvestLoad, InputApplication, MachineryUsage, Plot,
};

use crate::error::AppResult;
use crate::repository::{Collection, CropPriceRepository};
use crate::storage::KeyValueStore;

/// Money and bag figures are reported to the cent
const MONEY_DP: u32 = 2;
const ROI_DP: u32 = 1;

#[derive(Clone)]
pub struct DashboardService {
    plots: Collection<Plot>,
    loads: Collection<HarvestLoad>,
    applications: Collection<InputApplication>,
    usage: Collection<MachineryUsage>,
    refills: Collection<FuelRefill>,
    prices: CropPriceRepository,
}

/// One crop row of the dashboard
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CropReport {
    pub crop_type: String,
    #[serde(flatten)]
    pub summary: CropSummary,
    /// Profit over cost in percent; absent when the crop has no cost
    pub roi_percent: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardReport {
    pub crops: Vec<CropReport>,
    pub totals: FarmTotals,
    pub fuel_cost_per_hour: Decimal,
}

impl DashboardService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            plots: Collection::new(Arc::clone(&store)),
            loads: Collection::new(Arc::clone(&store)),
            applications: Collection::new(Arc::clone(&store)),
            usage: Collection::new(Arc::clone(&store)),
            refills: Collection::new(Arc::clone(&store)),
            prices: CropPriceRepository::new(store),
        }
    }

    pub async fn report(&self) -> AppResult<DashboardReport> {
        let (plots, loads, applications, usage, refills, prices) = tokio::try_join!(
            self.plots.list(),
            self.loads.list(),
            self.applications.list(),
            self.usage.list(),
            self.refills.list(),
            self.prices.list(),
        )?;

        tracing::debug!(
            "Building dashboard from {} plots and {} loads",
            plots.len(),
            loads.len()
        );

        let financials = aggregate_by_crop(&plots, &loads, &applications, &usage, &prices, &refills);
        let rate = fuel_cost_per_hour(&refills, &usage);

        Ok(build_report(financials, rate))
    }
}

/// Round every bucket for display; totals are summed from the rounded rows
fn build_report(financials: CropFinancials, fuel_cost_per_hour: Decimal) -> DashboardReport {
    let rounded: CropFinancials = financials
        .into_iter()
        .map(|(crop, summary)| (crop, round_summary(&summary)))
        .collect();

    let totals = farm_totals(&rounded);
    let crops = rounded
        .into_iter()
        .map(|(crop_type, summary)| CropReport {
            crop_type,
            roi_percent: roi_percent(summary.profit, summary.cost).map(|roi| round(roi, ROI_DP)),
            summary,
        })
        .collect();

    DashboardReport {
        crops,
        totals,
        fuel_cost_per_hour: round(fuel_cost_per_hour, MONEY_DP),
    }
}

fn round_summary(summary: &CropSummary) -> CropSummary {
    CropSummary {
        area: round(summary.area, MONEY_DP),
        net_bags: round(summary.net_bags, MONEY_DP),
        input_cost: round(summary.input_cost, MONEY_DP),
        machine_hours: round(summary.machine_hours, MONEY_DP),
        revenue: round(summary.revenue, MONEY_DP),
        cost: round(summary.cost, MONEY_DP),
        profit: round(summary.profit, MONEY_DP),
        profit_per_ha: round(summary.profit_per_ha, MONEY_DP),
        productivity_per_ha: round(summary.productivity_per_ha, MONEY_DP),
    }
}

/// Half-up rounding, as shown to the farmer
fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
