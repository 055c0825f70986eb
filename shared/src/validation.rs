//! Validation utilities for the Farm Management Platform
//!
//! Range checks applied to user-entered records before they are stored. The
//! calculation core itself assumes values that already passed these checks.

use rust_decimal::Decimal;

/// Largest area, weight, quantity, price, stock or hour count accepted on entry
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

// ============================================================================
// Field Validations
// ============================================================================

/// Validate that a plot area is strictly positive
pub fn validate_area_hectares(area: Decimal) -> Result<(), &'static str> {
    if area <= Decimal::ZERO {
        return Err("Area must be greater than zero");
    }
    Ok(())
}

/// Validate a gross harvest weight
pub fn validate_gross_weight(weight_kg: Decimal) -> Result<(), &'static str> {
    if weight_kg <= Decimal::ZERO {
        return Err("Weight must be greater than zero");
    }
    Ok(())
}

/// Validate that a moisture reading is a percentage
pub fn validate_moisture_percent(moisture: Decimal) -> Result<(), &'static str> {
    if moisture < Decimal::ZERO || moisture > Decimal::ONE_HUNDRED {
        return Err("Moisture must be between 0 and 100%");
    }
    Ok(())
}

/// Validate hours logged for a machine session
pub fn validate_hours_used(hours: Decimal) -> Result<(), &'static str> {
    if hours <= Decimal::ZERO {
        return Err("Hours used must be greater than zero");
    }
    Ok(())
}

/// Validate a refueled volume
pub fn validate_fuel_quantity(liters: Decimal) -> Result<(), &'static str> {
    if liters <= Decimal::ZERO {
        return Err("Fuel quantity must be greater than zero");
    }
    Ok(())
}

/// Validate a price, stock level or quantity that may be zero but not negative
pub fn validate_non_negative(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO {
        return Err("Value cannot be negative");
    }
    Ok(())
}

/// Validate an application line quantity
pub fn validate_application_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be greater than zero");
    }
    Ok(())
}

/// Validate that an entered amount does not exceed `MAX_AMOUNT`
pub fn validate_amount_limit(value: Decimal) -> Result<(), &'static str> {
    if value > MAX_AMOUNT {
        return Err("Value exceeds the maximum of 1,000,000,000");
    }
    Ok(())
}

/// Validate a machine's model year
pub fn validate_machine_year(year: i32) -> Result<(), &'static str> {
    if !(1900..=2100).contains(&year) {
        return Err("Year must be between 1900 and 2100");
    }
    Ok(())
}

// ============================================================================
// Agronomic Checks
// ============================================================================

/// Whether a load arrived above the 14% basis and will be discounted
pub fn needs_moisture_discount(moisture: Decimal) -> bool {
    moisture > crate::types::BASIS_MOISTURE_PERCENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_validate_area() {
        assert!(validate_area_hectares(dec("50")).is_ok());
        assert!(validate_area_hectares(dec("0.5")).is_ok());
        assert!(validate_area_hectares(Decimal::ZERO).is_err());
        assert!(validate_area_hectares(dec("-3")).is_err());
    }

    #[test]
    fn test_validate_gross_weight() {
        assert!(validate_gross_weight(dec("32000")).is_ok());
        assert!(validate_gross_weight(Decimal::ZERO).is_err());
    }

    #[test]
    fn test_validate_moisture() {
        assert!(validate_moisture_percent(Decimal::ZERO).is_ok());
        assert!(validate_moisture_percent(dec("14")).is_ok());
        assert!(validate_moisture_percent(dec("100")).is_ok());
        assert!(validate_moisture_percent(dec("100.1")).is_err());
        assert!(validate_moisture_percent(dec("-1")).is_err());
    }

    #[test]
    fn test_validate_hours_and_fuel() {
        assert!(validate_hours_used(dec("7.5")).is_ok());
        assert!(validate_hours_used(Decimal::ZERO).is_err());
        assert!(validate_fuel_quantity(dec("250")).is_ok());
        assert!(validate_fuel_quantity(dec("-10")).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(Decimal::ZERO).is_ok());
        assert!(validate_non_negative(dec("12.90")).is_ok());
        assert!(validate_non_negative(dec("-0.01")).is_err());
    }

    #[test]
    fn test_validate_application_quantity() {
        assert!(validate_application_quantity(dec("2.5")).is_ok());
        assert!(validate_application_quantity(Decimal::ZERO).is_err());
    }

    #[test]
    fn test_validate_amount_limit() {
        assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000));
        assert!(validate_amount_limit(MAX_AMOUNT).is_ok());
        assert!(validate_amount_limit(Decimal::ZERO).is_ok());
        assert!(validate_amount_limit(dec("1000000000.01")).is_err());
        assert!(validate_amount_limit(Decimal::MAX).is_err());
    }

    #[test]
    fn test_validate_machine_year() {
        assert!(validate_machine_year(2019).is_ok());
        assert!(validate_machine_year(1899).is_err());
        assert!(validate_machine_year(2101).is_err());
    }

    #[test]
    fn test_needs_moisture_discount() {
        assert!(needs_moisture_discount(dec("14.5")));
        assert!(!needs_moisture_discount(dec("14")));
        assert!(!needs_moisture_discount(dec("11")));
    }
}
