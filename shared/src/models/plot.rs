//! Farm plot models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{RecordId, UNDEFINED_CROP};

/// A cultivated area (talhão)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plot {
    pub id: RecordId,
    pub name: String,
    pub area_hectares: Decimal,
    /// Free-form crop name, matched against crop prices by exact string
    #[serde(default)]
    pub crop_type: String,
    #[serde(default)]
    pub season: String,
}

impl Plot {
    /// Build an unsaved plot (id 0 until the collection assigns one)
    pub fn new(name: &str, area_hectares: Decimal, crop_type: &str, season: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            area_hectares,
            crop_type: crop_type.to_string(),
            season: season.to_string(),
        }
    }

    /// Crop bucket this plot aggregates into
    pub fn crop_bucket(&self) -> &str {
        if self.crop_type.trim().is_empty() {
            UNDEFINED_CROP
        } else {
            &self.crop_type
        }
    }
}

/// Plots present before anything has been saved
pub fn default_plots() -> Vec<Plot> {
    vec![
        Plot {
            id: 1,
            name: "Talhão Norte".to_string(),
            area_hectares: Decimal::from(50),
            crop_type: "Soja".to_string(),
            season: "24/25".to_string(),
        },
        Plot {
            id: 2,
            name: "Talhão Sul".to_string(),
            area_hectares: Decimal::from(120),
            crop_type: "Milho".to_string(),
            season: "24/25".to_string(),
        },
    ]
}
