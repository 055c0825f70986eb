//! Moisture correction of harvested weight

use rust_decimal::Decimal;

use crate::models::HarvestLoad;
use crate::types::{BAG_WEIGHT_KG, BASIS_MOISTURE_PERCENT};

/// Moisture used for correction: absent or zero readings count as the basis
pub fn effective_moisture(moisture_percent: Option<Decimal>, basis_moisture_percent: Decimal) -> Decimal {
    match moisture_percent {
        Some(moisture) if !moisture.is_zero() => moisture,
        _ => basis_moisture_percent,
    }
}

/// Net sellable weight after discounting water above the basis moisture
///
/// Loads at or below the basis keep their gross weight (no bonus for dry
/// grain). A reading of 100% or more yields zero or a negative weight, which
/// is returned as computed.
pub fn corrected_weight(
    gross_weight_kg: Decimal,
    moisture_percent: Option<Decimal>,
    basis_moisture_percent: Decimal,
) -> Decimal {
    let moisture = effective_moisture(moisture_percent, basis_moisture_percent);
    if moisture <= basis_moisture_percent {
        return gross_weight_kg;
    }

    let denominator = Decimal::ONE_HUNDRED - basis_moisture_percent;
    if denominator <= Decimal::ZERO {
        return gross_weight_kg;
    }

    gross_weight_kg
        .checked_mul(Decimal::ONE_HUNDRED - moisture)
        .and_then(|scaled| scaled.checked_div(denominator))
        .unwrap_or(gross_weight_kg)
}

/// Convert a net weight into standard 60 kg bags
pub fn net_bags(net_weight_kg: Decimal) -> Decimal {
    net_weight_kg / BAG_WEIGHT_KG
}

/// Net weight of a harvest load at the standard 14% basis
pub fn load_net_weight(load: &HarvestLoad) -> Decimal {
    corrected_weight(load.weight_kg, load.moisture_percent, BASIS_MOISTURE_PERCENT)
}

/// Net bags of a harvest load at the standard 14% basis
pub fn load_net_bags(load: &HarvestLoad) -> Decimal {
    net_bags(load_net_weight(load))
}
