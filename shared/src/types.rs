//! Common types and fixed domain constants used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a stored record (positive, unique within its collection)
pub type RecordId = i64;

/// Weight of one standard bag (saca) in kilograms
pub const BAG_WEIGHT_KG: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Reference moisture at which no weight correction applies
pub const BASIS_MOISTURE_PERCENT: Decimal = Decimal::from_parts(14, 0, 0, false, 0);

/// Stock level below which an input is flagged for reordering
pub const LOW_STOCK_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Bucket name for plots without a crop type
pub const UNDEFINED_CROP: &str = "Undefined";

/// Crops quoted on the market price board, in display order
pub const MARKET_CROPS: [&str; 7] = ["Soja", "Milho", "Trigo", "Algodão", "Café", "Cana", "Feijão"];

/// Error returned when parsing a domain enum from text
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Measurement unit of an input item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    /// Liters
    #[default]
    L,
    /// Kilograms
    KG,
    /// Units (packs, bags, doses)
    UN,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::L => "L",
            Unit::KG => "KG",
            Unit::UN => "UN",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Unit {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Unit::L),
            "KG" => Ok(Unit::KG),
            "UN" => Ok(Unit::UN),
            _ => Err(ParseEnumError {
                kind: "unit",
                value: s.to_string(),
            }),
        }
    }
}

/// Operational status of a machine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum MachineStatus {
    #[default]
    #[serde(alias = "Ativo")]
    Active,
    #[serde(alias = "Manutenção")]
    Maintenance,
    #[serde(alias = "Inativo")]
    Inactive,
}

impl MachineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineStatus::Active => "Active",
            MachineStatus::Maintenance => "Maintenance",
            MachineStatus::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MachineStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Active" | "Ativo" => Ok(MachineStatus::Active),
            "Maintenance" | "Manutenção" => Ok(MachineStatus::Maintenance),
            "Inactive" | "Inativo" => Ok(MachineStatus::Inactive),
            _ => Err(ParseEnumError {
                kind: "machine status",
                value: s.to_string(),
            }),
        }
    }
}
