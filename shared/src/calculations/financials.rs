//! Per-plot and per-crop cost, revenue and productivity aggregation

use std::collections::HashMap;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fuel::fuel_cost_per_hour;
use super::moisture::load_net_bags;
use super::pricing::resolve_crop_price;
use super::{ratio_or_zero, saturating_sum};
use crate::models::{CropPrice, FuelRefill, HarvestLoad, InputApplication, MachineryUsage, Plot};
use crate::types::RecordId;

/// Aggregated financial and agronomic figures of one crop bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CropSummary {
    /// Total hectares of the plots in this bucket
    pub area: Decimal,
    /// Moisture-corrected 60 kg bags harvested
    pub net_bags: Decimal,
    pub input_cost: Decimal,
    pub machine_hours: Decimal,
    pub revenue: Decimal,
    /// Input cost plus machine hours at the fleet fuel rate
    pub cost: Decimal,
    pub profit: Decimal,
    pub profit_per_ha: Decimal,
    /// Net bags per hectare
    pub productivity_per_ha: Decimal,
}

/// Crop buckets keyed by crop type, in first-seen plot order
pub type CropFinancials = IndexMap<String, CropSummary>;

/// Revenue, cost and profit summed over every crop bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FarmTotals {
    pub revenue: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
}

/// Harvest figures of a single plot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotStatistics {
    pub plot_id: RecordId,
    pub load_count: usize,
    pub net_bags: Decimal,
    /// Net bags per hectare
    pub productivity_per_ha: Decimal,
}

/// Totals over a set of harvest loads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductionTotals {
    pub load_count: usize,
    /// Physical weight as delivered, without moisture correction
    pub gross_weight_kg: Decimal,
    pub net_bags: Decimal,
    /// Sum of the values stamped on the loads
    pub total_value: Decimal,
}

/// Join plots, loads, applications, usage and fuel into per-crop financials
///
/// Records pointing at a plot that no longer exists contribute nothing.
/// Fuel is charged with a single fleet-wide cost per hour.
pub fn aggregate_by_crop(
    plots: &[Plot],
    harvest_loads: &[HarvestLoad],
    input_applications: &[InputApplication],
    machinery_usage: &[MachineryUsage],
    crop_prices: &[CropPrice],
    fuel_refills: &[FuelRefill],
) -> CropFinancials {
    let mut input_cost_by_plot: HashMap<RecordId, Decimal> = HashMap::new();
    for application in input_applications {
        let cost = input_cost_by_plot.entry(application.plot_id).or_default();
        *cost = cost.saturating_add(application.total_application_cost);
    }

    let mut hours_by_plot: HashMap<RecordId, Decimal> = HashMap::new();
    for session in machinery_usage {
        let hours = hours_by_plot.entry(session.plot_id).or_default();
        *hours = hours.saturating_add(session.hours_used);
    }

    let mut buckets = CropFinancials::new();
    let mut plots_by_id: HashMap<RecordId, &Plot> = HashMap::new();
    for plot in plots {
        plots_by_id.entry(plot.id).or_insert(plot);

        let bucket = buckets.entry(plot.crop_bucket().to_string()).or_default();
        bucket.area = bucket.area.saturating_add(plot.area_hectares);
        bucket.input_cost = bucket
            .input_cost
            .saturating_add(input_cost_by_plot.get(&plot.id).copied().unwrap_or_default());
        bucket.machine_hours = bucket
            .machine_hours
            .saturating_add(hours_by_plot.get(&plot.id).copied().unwrap_or_default());
    }

    for load in harvest_loads {
        let Some(plot) = plots_by_id.get(&load.plot_id) else {
            continue;
        };
        let crop = plot.crop_bucket();
        let Some(bucket) = buckets.get_mut(crop) else {
            continue;
        };

        let bags = load_net_bags(load);
        let revenue = if load.has_recorded_price() {
            load.total_value.unwrap_or_default()
        } else {
            bags.saturating_mul(resolve_crop_price(crop, crop_prices).unwrap_or_default())
        };
        bucket.net_bags = bucket.net_bags.saturating_add(bags);
        bucket.revenue = bucket.revenue.saturating_add(revenue);
    }

    let rate = fuel_cost_per_hour(fuel_refills, machinery_usage);
    for bucket in buckets.values_mut() {
        bucket.cost = bucket
            .input_cost
            .saturating_add(bucket.machine_hours.saturating_mul(rate));
        bucket.profit = bucket.revenue.saturating_sub(bucket.cost);
        bucket.productivity_per_ha = ratio_or_zero(bucket.net_bags, bucket.area);
        bucket.profit_per_ha = ratio_or_zero(bucket.profit, bucket.area);
    }

    buckets
}

/// Return on cost as a percentage, for display; `None` when there is no cost
pub fn roi_percent(profit: Decimal, cost: Decimal) -> Option<Decimal> {
    if cost.is_zero() {
        return None;
    }
    profit
        .checked_div(cost)
        .map(|share| share.saturating_mul(Decimal::ONE_HUNDRED))
}

/// Farm-wide revenue, cost and profit
pub fn farm_totals(financials: &CropFinancials) -> FarmTotals {
    let revenue = saturating_sum(financials.values().map(|bucket| bucket.revenue));
    let cost = saturating_sum(financials.values().map(|bucket| bucket.cost));
    FarmTotals {
        revenue,
        cost,
        profit: revenue.saturating_sub(cost),
    }
}

/// Net bags and productivity of one plot
pub fn plot_statistics(plot: &Plot, harvest_loads: &[HarvestLoad]) -> PlotStatistics {
    let plot_loads: Vec<&HarvestLoad> = harvest_loads
        .iter()
        .filter(|load| load.plot_id == plot.id)
        .collect();
    let net_bags = saturating_sum(plot_loads.iter().map(|load| load_net_bags(load)));

    PlotStatistics {
        plot_id: plot.id,
        load_count: plot_loads.len(),
        net_bags,
        productivity_per_ha: ratio_or_zero(net_bags, plot.area_hectares),
    }
}

/// Gross weight, net bags and stamped value over a set of loads
pub fn production_totals(harvest_loads: &[HarvestLoad]) -> ProductionTotals {
    ProductionTotals {
        load_count: harvest_loads.len(),
        gross_weight_kg: saturating_sum(harvest_loads.iter().map(|load| load.weight_kg)),
        net_bags: saturating_sum(harvest_loads.iter().map(load_net_bags)),
        total_value: saturating_sum(
            harvest_loads
                .iter()
                .map(|load| load.total_value.unwrap_or_default()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::test_support::*;
    use crate::models::default_crop_prices;
    use proptest::prelude::*;

    #[test]
    fn test_single_load_with_recorded_price() {
        let plots = vec![plot(1, "Soja", "10")];
        let mut sale = load(1, 1, "600", Some("14"));
        sale.price_per_bag = Some(dec("100"));
        sale.total_value = Some(dec("1000"));

        let financials = aggregate_by_crop(&plots, &[sale], &[], &[], &[], &[]);
        let soja = &financials["Soja"];

        assert_eq!(soja.net_bags, dec("10"));
        assert_eq!(soja.revenue, dec("1000"));
        assert_eq!(soja.cost, Decimal::ZERO);
        assert_eq!(soja.profit, dec("1000"));
        assert_eq!(soja.productivity_per_ha, dec("1"));
        assert_eq!(soja.profit_per_ha, dec("100"));
    }

    #[test]
    fn test_recorded_price_uses_stored_value_not_recomputed() {
        let plots = vec![plot(1, "Soja", "10")];
        let mut sale = load(1, 1, "600", Some("14"));
        sale.price_per_bag = Some(dec("100"));
        sale.total_value = Some(dec("950"));

        let financials = aggregate_by_crop(&plots, &[sale], &[], &[], &default_crop_prices(), &[]);
        assert_eq!(financials["Soja"].revenue, dec("950"));
    }

    #[test]
    fn test_unpriced_load_falls_back_to_market_price() {
        let plots = vec![plot(1, "Milho", "20")];
        let loads = vec![load(1, 1, "1200", None)];

        let financials = aggregate_by_crop(&plots, &loads, &[], &[], &default_crop_prices(), &[]);
        // 20 bags × 58.00
        assert_eq!(financials["Milho"].revenue, dec("1160"));
    }

    #[test]
    fn test_unpriced_load_without_market_price_earns_nothing() {
        let plots = vec![plot(1, "Café", "5")];
        let loads = vec![load(1, 1, "1200", None)];

        let financials = aggregate_by_crop(&plots, &loads, &[], &[], &default_crop_prices(), &[]);
        assert_eq!(financials["Café"].net_bags, dec("20"));
        assert_eq!(financials["Café"].revenue, Decimal::ZERO);
    }

    #[test]
    fn test_zero_fleet_hours_means_cost_is_input_cost() {
        let plots = vec![plot(1, "Soja", "50")];
        let applications = vec![application(1, 1, "3200")];
        let refills = vec![refill(1, 1, "500", Some("6"))];

        let financials = aggregate_by_crop(&plots, &[], &applications, &[], &[], &refills);
        assert_eq!(financials["Soja"].cost, dec("3200"));
        assert_eq!(financials["Soja"].profit, dec("-3200"));
    }

    #[test]
    fn test_fuel_cost_attributed_by_fleet_rate() {
        let plots = vec![plot(1, "Soja", "50"), plot(2, "Milho", "120")];
        // 1000 currency of fuel over 40 fleet hours = 25 per hour
        let refills = vec![refill(1, 1, "200", Some("5"))];
        let usage = vec![usage(1, 1, 1, "10"), usage(2, 2, 2, "30")];

        let financials = aggregate_by_crop(&plots, &[], &[], &usage, &[], &refills);
        assert_eq!(financials["Soja"].machine_hours, dec("10"));
        assert_eq!(financials["Soja"].cost, dec("250"));
        assert_eq!(financials["Milho"].cost, dec("750"));
    }

    #[test]
    fn test_plots_with_same_crop_share_a_bucket() {
        let plots = vec![plot(1, "Soja", "50"), plot(2, "Milho", "120"), plot(3, "Soja", "30")];
        let applications = vec![application(1, 1, "100"), application(2, 3, "50")];

        let financials = aggregate_by_crop(&plots, &[], &applications, &[], &[], &[]);
        assert_eq!(financials.len(), 2);
        assert_eq!(financials["Soja"].area, dec("80"));
        assert_eq!(financials["Soja"].input_cost, dec("150"));
        let order: Vec<&str> = financials.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["Soja", "Milho"]);
    }

    #[test]
    fn test_blank_crop_goes_to_undefined_bucket() {
        let plots = vec![plot(1, "", "12")];
        let financials = aggregate_by_crop(&plots, &[], &[], &[], &[], &[]);
        assert!(financials.contains_key("Undefined"));
    }

    #[test]
    fn test_loads_of_deleted_plot_are_dropped() {
        let plots = vec![plot(2, "Milho", "120")];
        let loads = vec![load(1, 1, "6000", None), load(2, 2, "600", None)];

        let financials = aggregate_by_crop(&plots, &loads, &[], &[], &default_crop_prices(), &[]);
        assert_eq!(financials.len(), 1);
        assert_eq!(financials["Milho"].net_bags, dec("10"));
    }

    #[test]
    fn test_empty_inputs_produce_no_buckets() {
        let financials = aggregate_by_crop(&[], &[], &[], &[], &[], &[]);
        assert!(financials.is_empty());
        assert_eq!(farm_totals(&financials), FarmTotals::default());
    }

    #[test]
    fn test_roi_percent() {
        assert_eq!(roi_percent(dec("500"), dec("1000")), Some(dec("50")));
        assert_eq!(roi_percent(dec("500"), Decimal::ZERO), None);
    }

    #[test]
    fn test_farm_totals() {
        let plots = vec![plot(1, "Soja", "10"), plot(2, "Milho", "10")];
        let loads = vec![load(1, 1, "600", None), load(2, 2, "600", None)];
        let applications = vec![application(1, 2, "100")];

        let financials =
            aggregate_by_crop(&plots, &loads, &applications, &[], &default_crop_prices(), &[]);
        let totals = farm_totals(&financials);
        // 10 × 125.50 + 10 × 58.00
        assert_eq!(totals.revenue, dec("1835"));
        assert_eq!(totals.cost, dec("100"));
        assert_eq!(totals.profit, dec("1735"));
    }

    #[test]
    fn test_plot_statistics() {
        let target = plot(1, "Soja", "50");
        let loads = vec![
            load(1, 1, "3000", Some("14")),
            load(2, 1, "3000", Some("10")),
            load(3, 2, "9000", None),
        ];
        let stats = plot_statistics(&target, &loads);
        assert_eq!(stats.load_count, 2);
        assert_eq!(stats.net_bags, dec("100"));
        assert_eq!(stats.productivity_per_ha, dec("2"));
    }

    #[test]
    fn test_production_totals() {
        let mut first = load(1, 1, "6000", Some("20"));
        first.total_value = Some(dec("11674.42"));
        let second = load(2, 1, "600", None);

        let totals = production_totals(&[first, second]);
        assert_eq!(totals.load_count, 2);
        assert_eq!(totals.gross_weight_kg, dec("6600"));
        assert_eq!(totals.total_value, dec("11674.42"));
    }

    #[test]
    fn test_oversized_records_clamp_instead_of_panicking() {
        let plots = vec![plot(1, "Soja", "70000000000000000000000000000"), plot(2, "Soja", "70000000000000000000000000000")];
        let applications = vec![application(1, 1, "70000000000000000000000000000"), application(2, 1, "70000000000000000000000000000")];
        let mut sale = load(1, 1, "70000000000000000000000000000", None);
        sale.price_per_bag = Some(dec("10000000000"));
        sale.total_value = Some(dec("70000000000000000000000000000"));
        let loads = vec![sale.clone(), sale];

        let financials =
            aggregate_by_crop(&plots, &loads, &applications, &[], &default_crop_prices(), &[]);
        let soja = &financials["Soja"];
        assert_eq!(soja.area, Decimal::MAX);
        assert_eq!(soja.input_cost, Decimal::MAX);
        assert_eq!(soja.revenue, Decimal::MAX);

        let totals = farm_totals(&financials);
        assert_eq!(totals.profit, Decimal::ZERO);
        assert_eq!(production_totals(&loads).gross_weight_kg, Decimal::MAX);
    }

    proptest! {
        #[test]
        fn test_total_profit_is_revenue_minus_cost(
            weights in prop::collection::vec(100..=20_000i64, 0..10),
            costs in prop::collection::vec(0..=5_000i64, 0..10),
        ) {
            let plots = vec![plot(1, "Soja", "50"), plot(2, "Milho", "120")];
            let loads: Vec<_> = weights
                .iter()
                .enumerate()
                .map(|(i, w)| load(i as i64 + 1, (i % 2) as i64 + 1, &w.to_string(), None))
                .collect();
            let applications: Vec<_> = costs
                .iter()
                .enumerate()
                .map(|(i, c)| application(i as i64 + 1, (i % 2) as i64 + 1, &c.to_string()))
                .collect();

            let financials =
                aggregate_by_crop(&plots, &loads, &applications, &[], &default_crop_prices(), &[]);
            let totals = farm_totals(&financials);
            prop_assert_eq!(totals.profit, totals.revenue - totals.cost);
            let expected_cost: Decimal = costs.iter().map(|c| Decimal::from(*c)).sum();
            prop_assert_eq!(totals.cost, expected_cost);
        }
    }
}
