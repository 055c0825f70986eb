//! Crop market price models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fallback sale price for a crop, keyed by crop type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropPrice {
    pub crop_type: String,
    pub price_per_bag: Decimal,
}

impl CropPrice {
    pub fn new(crop_type: &str, price_per_bag: Decimal) -> Self {
        Self {
            crop_type: crop_type.to_string(),
            price_per_bag,
        }
    }
}

/// Prices present before anything has been saved
pub fn default_crop_prices() -> Vec<CropPrice> {
    vec![
        CropPrice::new("Soja", Decimal::new(12550, 2)),
        CropPrice::new("Milho", Decimal::new(5800, 2)),
        CropPrice::new("Trigo", Decimal::new(8500, 2)),
        CropPrice::new("Algodão", Decimal::new(14000, 2)),
    ]
}
