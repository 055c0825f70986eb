//! Pure domain calculations over flat collections
//!
//! Nothing in here touches storage: callers fetch whole collections and pass
//! slices in, and every function returns a fresh value. Ratios whose
//! denominator is zero evaluate to zero instead of failing, and sums and
//! products clamp at the decimal range instead of overflowing.

pub mod financials;
pub mod fuel;
pub mod moisture;
pub mod pricing;

pub use financials::*;
pub use fuel::*;
pub use moisture::*;
pub use pricing::*;

use rust_decimal::Decimal;

/// `numerator / denominator`, or zero when the denominator is zero or the division overflows
pub(crate) fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Sum that clamps at the decimal range rather than overflowing
pub(crate) fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_or_zero() {
        assert_eq!(ratio_or_zero(Decimal::from(30), Decimal::from(20)), Decimal::new(15, 1));
        assert_eq!(ratio_or_zero(Decimal::from(30), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(ratio_or_zero(Decimal::MAX, Decimal::new(1, 10)), Decimal::ZERO);
    }

    #[test]
    fn test_saturating_sum_clamps() {
        assert_eq!(saturating_sum([Decimal::ONE, Decimal::TWO]), Decimal::from(3));
        assert_eq!(saturating_sum([Decimal::MAX, Decimal::MAX]), Decimal::MAX);
        assert_eq!(saturating_sum(Vec::new()), Decimal::ZERO);
    }
}
