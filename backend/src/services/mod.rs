//! Business logic services for the Farm Management Platform

pub mod crop_price;
pub mod dashboard;
pub mod inputs;
pub mod machinery;
pub mod plot;
pub mod production;

pub use crop_price::CropPriceService;
pub use dashboard::DashboardService;
pub use inputs::InputService;
pub use machinery::MachineryService;
pub use plot::PlotService;
pub use production::ProductionService;

use rust_decimal::Decimal;
use shared::validate_amount_limit;

use crate::error::{AppError, AppResult};

/// Turn a range check from `shared::validation` into a field-level error
pub(crate) fn check_field(
    field: &str,
    outcome: Result<(), &'static str>,
    message_pt: &str,
) -> AppResult<()> {
    outcome.map_err(|message| AppError::Validation {
        field: field.to_string(),
        message: message.to_string(),
        message_pt: message_pt.to_string(),
    })
}

/// Reject an amount above `shared::MAX_AMOUNT`
pub(crate) fn check_limit(field: &str, value: Decimal) -> AppResult<()> {
    check_field(
        field,
        validate_amount_limit(value),
        "O valor excede o máximo de 1.000.000.000",
    )
}

/// Optional text field: blank input is stored as absent
pub(crate) fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
