//! Crop price resolution and entry-time valuation

use rust_decimal::Decimal;

use super::moisture::{corrected_weight, net_bags};
use super::saturating_sum;
use crate::models::{ApplicationItem, CropPrice};
use crate::types::{BASIS_MOISTURE_PERCENT, MARKET_CROPS};

/// Market price for a crop type (exact string match)
pub fn resolve_crop_price(crop_type: &str, prices: &[CropPrice]) -> Option<Decimal> {
    prices
        .iter()
        .find(|price| price.crop_type == crop_type)
        .map(|price| price.price_per_bag)
}

/// Value stamped on a harvest load when it is recorded: net bags × negotiated price
pub fn harvest_load_value(
    gross_weight_kg: Decimal,
    moisture_percent: Option<Decimal>,
    price_per_bag: Option<Decimal>,
) -> Decimal {
    let bags = net_bags(corrected_weight(
        gross_weight_kg,
        moisture_percent,
        BASIS_MOISTURE_PERCENT,
    ));
    bags.saturating_mul(price_per_bag.unwrap_or(Decimal::ZERO))
}

/// Cost of one application line at the input's current price
pub fn application_item_cost(quantity: Decimal, price_per_unit: Decimal) -> Decimal {
    quantity.saturating_mul(price_per_unit)
}

/// Total cost of an application: the sum of its lines
pub fn application_total(items: &[ApplicationItem]) -> Decimal {
    saturating_sum(items.iter().map(|item| item.total_cost))
}

/// Cost of a refill; only known when a price per liter was given
pub fn refill_total_cost(quantity_liters: Decimal, price_per_liter: Option<Decimal>) -> Option<Decimal> {
    price_per_liter.map(|price| quantity_liters.saturating_mul(price))
}

/// The market crops with their current price (zero when none is set), in board order
pub fn price_board(prices: &[CropPrice]) -> Vec<CropPrice> {
    MARKET_CROPS
        .iter()
        .map(|crop| CropPrice::new(crop, resolve_crop_price(crop, prices).unwrap_or(Decimal::ZERO)))
        .collect()
}
