//! Dashboard and production tests
//!
//! Exercises the per-crop rollup end to end over an in-memory store:
//! - Loads valued at their negotiated price or the market price
//! - Fleet fuel cost charged per machine hour
//! - Deleted plots dropping out of the rollup

use std::str::FromStr;
use std::sync::Arc;

use agro_backend::services::crop_price::CropPriceInput;
use agro_backend::services::inputs::{ApplicationInput, ApplicationLineInput, InputItemInput};
use agro_backend::services::machinery::{MachineInput, RefillInput, UsageInput};
use agro_backend::services::plot::PlotInput;
use agro_backend::services::production::HarvestLoadInput;
use agro_backend::services::{
    CropPriceService, DashboardService, InputService, MachineryService, PlotService,
    ProductionService,
};
use agro_backend::{AppError, KeyValueStore, MemoryStore};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{MachineStatus, RecordId, Unit};

// ============================================================================
// Fixtures
// ============================================================================

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, d).unwrap()
}

fn store() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::new())
}

fn load(plot_id: RecordId, weight: &str, moisture: Option<&str>, price: Option<&str>) -> HarvestLoadInput {
    HarvestLoadInput {
        date: day(10),
        plot_id,
        weight_kg: dec(weight),
        moisture_percent: moisture.map(dec),
        price_per_bag: price.map(dec),
        destination: "Cooperativa".to_string(),
        truck_plate: "abc1d23".to_string(),
    }
}

fn tractor() -> MachineInput {
    MachineInput {
        name: "Trator 6110J".to_string(),
        machine_type: "Trator".to_string(),
        model: "6110J".to_string(),
        year: 2019,
        status: MachineStatus::Active,
    }
}

// ============================================================================
// Production
// ============================================================================

#[tokio::test]
async fn test_load_is_stamped_with_plot_and_value() {
    let production = ProductionService::new(store());

    let saved = production
        .save_load(load(1, "1000", Some("20"), Some("120")), None)
        .await
        .unwrap();

    assert_eq!(saved.plot_name, "Talhão Norte");
    assert_eq!(saved.truck_plate, "ABC1D23");
    // 930.23 kg net is 15.50 bags
    let value = saved.total_value.unwrap();
    assert!((value - dec("1860.47")).abs() < dec("0.01"));
}

#[tokio::test]
async fn test_load_without_price_has_no_value() {
    let production = ProductionService::new(store());
    let saved = production
        .save_load(load(2, "600", None, None), None)
        .await
        .unwrap();
    assert_eq!(saved.total_value, None);
}

#[tokio::test]
async fn test_load_validation() {
    let production = ProductionService::new(store());

    let unknown_plot = production.save_load(load(9, "600", None, None), None).await;
    assert!(matches!(unknown_plot, Err(AppError::NotFound(_))));

    let zero_weight = production.save_load(load(1, "0", None, None), None).await;
    assert!(matches!(zero_weight, Err(AppError::Validation { .. })));

    let soaked = production.save_load(load(1, "600", Some("101"), None), None).await;
    assert!(matches!(soaked, Err(AppError::Validation { .. })));
}

#[tokio::test]
async fn test_loads_listed_newest_first_with_totals() {
    let production = ProductionService::new(store());
    production.save_load(load(1, "600", None, Some("100")), None).await.unwrap();
    production.save_load(load(2, "1200", None, None), None).await.unwrap();
    production.save_load(load(1, "300", None, Some("100")), None).await.unwrap();

    let ids: Vec<RecordId> = production
        .list_loads()
        .await
        .unwrap()
        .iter()
        .map(|load| load.id)
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let totals = production.production_summary().await.unwrap();
    assert_eq!(totals.load_count, 3);
    assert_eq!(totals.gross_weight_kg, dec("2100"));
    assert_eq!(totals.net_bags, dec("35"));
    assert_eq!(totals.total_value, dec("1500"));
}

#[tokio::test]
async fn test_plot_statistics() {
    let store = store();
    let production = ProductionService::new(store.clone());
    let plots = PlotService::new(store);

    production.save_load(load(1, "3000", None, None), None).await.unwrap();
    production.save_load(load(2, "600", None, None), None).await.unwrap();

    let stats = plots.plot_statistics(1).await.unwrap();
    assert_eq!(stats.load_count, 1);
    assert_eq!(stats.net_bags, dec("50"));
    assert_eq!(stats.productivity_per_ha, dec("1"));

    assert!(matches!(plots.plot_statistics(9).await, Err(AppError::NotFound(_))));
}

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
async fn test_fresh_store_dashboard_has_seeded_crops() {
    let report = DashboardService::new(store()).report().await.unwrap();

    let crops: Vec<&str> = report.crops.iter().map(|c| c.crop_type.as_str()).collect();
    assert_eq!(crops, vec!["Soja", "Milho"]);
    assert_eq!(report.crops[0].summary.area, dec("50"));
    assert_eq!(report.crops[0].roi_percent, None);
    assert_eq!(report.totals.revenue, Decimal::ZERO);
    assert_eq!(report.fuel_cost_per_hour, Decimal::ZERO);
}

#[tokio::test]
async fn test_revenue_uses_recorded_or_market_price() {
    let store = store();
    let production = ProductionService::new(store.clone());

    // Negotiated price on Soja, market price (58.00) on Milho
    production.save_load(load(1, "600", Some("14"), Some("100")), None).await.unwrap();
    production.save_load(load(2, "1200", None, None), None).await.unwrap();

    let report = DashboardService::new(store).report().await.unwrap();
    let soja = &report.crops[0].summary;
    let milho = &report.crops[1].summary;

    assert_eq!(soja.net_bags, dec("10"));
    assert_eq!(soja.revenue, dec("1000"));
    assert_eq!(soja.profit, dec("1000"));
    assert_eq!(milho.net_bags, dec("20"));
    assert_eq!(milho.revenue, dec("1160"));
    assert_eq!(report.totals.revenue, dec("2160"));
}

#[tokio::test]
async fn test_market_price_update_revalues_unpriced_loads() {
    let store = store();
    ProductionService::new(store.clone())
        .save_load(load(2, "1200", None, None), None)
        .await
        .unwrap();
    CropPriceService::new(store.clone())
        .save_price(CropPriceInput {
            crop_type: "Milho".to_string(),
            price_per_bag: dec("60"),
        })
        .await
        .unwrap();

    let report = DashboardService::new(store).report().await.unwrap();
    assert_eq!(report.crops[1].summary.revenue, dec("1200"));
}

#[tokio::test]
async fn test_costs_include_inputs_and_fleet_fuel() {
    let store = store();
    let machinery = MachineryService::new(store.clone());
    let inputs = InputService::new(store.clone());
    let production = ProductionService::new(store.clone());

    machinery.save_machine(tractor(), None).await.unwrap();
    for (plot_id, hours) in [(1, "10"), (2, "30")] {
        machinery
            .save_usage(
                UsageInput {
                    machinery_id: 1,
                    plot_id,
                    usage_date: day(3),
                    hours_used: dec(hours),
                    fuel_consumed: None,
                    notes: String::new(),
                },
                None,
            )
            .await
            .unwrap();
    }
    // 400 L at 6.00: 2400 over 40 h is 60 per hour
    machinery
        .save_refill(
            RefillInput {
                machinery_id: 1,
                refill_date: day(1),
                quantity_liters: dec("400"),
                price_per_liter: Some(dec("6.00")),
                odometer_reading: None,
                notes: Some("  ".to_string()),
            },
            None,
        )
        .await
        .unwrap();

    inputs
        .save_item(
            InputItemInput {
                name: "Fungicida".to_string(),
                unit: Unit::L,
                price_per_unit: dec("150"),
                stock: dec("10"),
            },
            None,
        )
        .await
        .unwrap();
    inputs
        .save_application(
            ApplicationInput {
                date: day(4),
                plot_id: 1,
                machine_id: 1,
                items: vec![ApplicationLineInput {
                    input_id: 1,
                    quantity: dec("2"),
                }],
            },
            None,
        )
        .await
        .unwrap();

    production.save_load(load(1, "6000", None, Some("100")), None).await.unwrap();

    let report = DashboardService::new(store).report().await.unwrap();
    let soja = &report.crops[0];

    assert_eq!(report.fuel_cost_per_hour, dec("60"));
    assert_eq!(soja.summary.input_cost, dec("300"));
    assert_eq!(soja.summary.machine_hours, dec("10"));
    assert_eq!(soja.summary.cost, dec("900"));
    assert_eq!(soja.summary.revenue, dec("10000"));
    assert_eq!(soja.summary.profit, dec("9100"));
    assert_eq!(soja.summary.profit_per_ha, dec("182"));
    assert_eq!(soja.summary.productivity_per_ha, dec("2"));
    assert_eq!(soja.roi_percent, Some(dec("1011.1")));

    let milho = &report.crops[1];
    assert_eq!(milho.summary.cost, dec("1800"));
    assert_eq!(milho.roi_percent, Some(dec("-100")));
    assert_eq!(report.totals.cost, dec("2700"));
    assert_eq!(report.totals.profit, dec("7300"));
}

#[tokio::test]
async fn test_fleet_fuel_report() {
    let store = store();
    let machinery = MachineryService::new(store);
    machinery.save_machine(tractor(), None).await.unwrap();

    let refill = |liters: &str, price: Option<&str>| RefillInput {
        machinery_id: 1,
        refill_date: day(1),
        quantity_liters: dec(liters),
        price_per_liter: price.map(dec),
        odometer_reading: Some(dec("1520.5")),
        notes: None,
    };
    let first = machinery.save_refill(refill("200", Some("5.50")), None).await.unwrap();
    let second = machinery.save_refill(refill("100", None), None).await.unwrap();
    assert_eq!(first.total_cost, Some(dec("1100")));
    assert_eq!(first.machinery_name, "Trator 6110J");
    assert_eq!(second.total_cost, None);

    let report = machinery.fleet_fuel_report().await.unwrap();
    assert_eq!(report.totals.refill_count, 2);
    assert_eq!(report.totals.total_liters, dec("300"));
    assert_eq!(report.totals.total_cost, dec("1100"));
    assert_eq!(report.fuel_cost_per_hour, Decimal::ZERO);

    let efficiency = machinery.fuel_efficiency(1).await.unwrap();
    assert_eq!(efficiency.liters_refueled, dec("300"));
    assert_eq!(efficiency.liters_per_hour, Decimal::ZERO);
}

#[tokio::test]
async fn test_deleted_plot_drops_out_of_rollup() {
    let store = store();
    let plots = PlotService::new(store.clone());
    let production = ProductionService::new(store.clone());

    production.save_load(load(2, "1200", None, None), None).await.unwrap();
    plots.delete_plot(2).await.unwrap();

    // The load itself is kept
    assert_eq!(production.list_loads().await.unwrap().len(), 1);

    let report = DashboardService::new(store).report().await.unwrap();
    assert_eq!(report.crops.len(), 1);
    assert_eq!(report.crops[0].crop_type, "Soja");
    assert_eq!(report.totals.revenue, Decimal::ZERO);
}

#[tokio::test]
async fn test_blank_crop_goes_to_undefined_bucket() {
    let store = store();
    PlotService::new(store.clone())
        .save_plot(
            PlotInput {
                name: "Piquete".to_string(),
                area_hectares: dec("5"),
                crop_type: "  ".to_string(),
                season: String::new(),
            },
            None,
        )
        .await
        .unwrap();

    let report = DashboardService::new(store).report().await.unwrap();
    assert_eq!(report.crops[2].crop_type, "Undefined");
    assert_eq!(report.crops[2].summary.area, dec("5"));
}

#[tokio::test]
async fn test_usage_snapshots_names_and_checks_references() {
    let store = store();
    let machinery = MachineryService::new(store);
    machinery.save_machine(tractor(), None).await.unwrap();

    let usage = |machinery_id, plot_id| UsageInput {
        machinery_id,
        plot_id,
        usage_date: day(2),
        hours_used: dec("4.5"),
        fuel_consumed: Some(dec("40")),
        notes: "Plantio".to_string(),
    };

    let saved = machinery.save_usage(usage(1, 2), None).await.unwrap();
    assert_eq!(saved.machinery_name, "Trator 6110J");
    assert_eq!(saved.plot_name, "Talhão Sul");

    assert!(matches!(
        machinery.save_usage(usage(5, 2), None).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        machinery.save_usage(usage(1, 5), None).await,
        Err(AppError::NotFound(_))
    ));
}
