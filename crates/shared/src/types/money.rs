//! Money helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` end to end; aggregation keeps full
//! precision and rounding happens once, when a figure leaves the system.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places reported for monetary figures.
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to [`MONEY_SCALE`] places, half away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `percent` percent of `amount`, unrounded.
#[must_use]
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount * percent / Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(10.005), dec!(10.01))]
    #[case(dec!(10.004), dec!(10.00))]
    #[case(dec!(10.015), dec!(10.02))]
    #[case(dec!(-10.005), dec!(-10.01))]
    #[case(dec!(0.125), dec!(0.13))]
    #[case(dec!(99.999), dec!(100.00))]
    #[case(dec!(42), dec!(42))]
    fn test_round_money_half_away_from_zero(#[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(round_money(input), expected);
    }

    #[test]
    fn test_round_money_only_at_the_end() {
        // Three thirds summed unrounded give exactly 1.00; rounding each first would give 0.99.
        let third = dec!(1) / dec!(3);
        let unrounded = round_money(third + third + third);
        let premature = round_money(third) * dec!(3);

        assert_eq!(unrounded, dec!(1.00));
        assert_eq!(premature, dec!(0.99));
    }

    #[rstest]
    #[case(dec!(1000), dec!(10), dec!(100))]
    #[case(dec!(250), dec!(12.5), dec!(31.25))]
    #[case(dec!(0), dec!(50), dec!(0))]
    #[case(dec!(80), dec!(0), dec!(0))]
    fn test_percent_of(#[case] amount: Decimal, #[case] percent: Decimal, #[case] expected: Decimal) {
        assert_eq!(percent_of(amount, percent), expected);
    }
}
