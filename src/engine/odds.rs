use rust_decimal::Decimal;

/// Convert American (moneyline) odds to decimal odds.
/// Non-negative odds (e.g., +150): decimal = 1 + odds / 100
/// Negative odds (e.g., -110): decimal = 1 + 100 / |odds|
///
/// The result is always >= 1. Zero takes the first branch and maps to
/// exactly 1, so there is a jump at the origin: -1 maps to 101.
/// Returns `None` only when the result does not fit in a `Decimal`.
pub fn american_to_decimal(odds: Decimal) -> Option<Decimal> {
    if odds >= Decimal::ZERO {
        odds.checked_div(Decimal::ONE_HUNDRED)?.checked_add(Decimal::ONE)
    } else {
        Decimal::ONE_HUNDRED.checked_div(odds.abs())?.checked_add(Decimal::ONE)
    }
}

/// Inverse of [`american_to_decimal`].
/// Decimal odds of 2 or more map to positive odds; odds between 1 and 2
/// map to negative odds; exactly 1 maps to 0. Below 1 is not a price.
pub fn decimal_to_american(decimal: Decimal) -> Option<Decimal> {
    if decimal < Decimal::ONE {
        return None;
    }
    let profit = decimal - Decimal::ONE;
    if profit.is_zero() {
        Some(Decimal::ZERO)
    } else if decimal >= Decimal::TWO {
        profit.checked_mul(Decimal::ONE_HUNDRED)
    } else {
        Decimal::ONE_HUNDRED.checked_div(profit).map(|v| -v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_odds() {
        assert_eq!(american_to_decimal(dec!(150)), Some(dec!(2.5)));
        assert_eq!(american_to_decimal(dec!(100)), Some(dec!(2)));
        assert_eq!(american_to_decimal(dec!(152.5)), Some(dec!(2.525)));
    }

    #[test]
    fn test_zero_is_even_money_floor() {
        assert_eq!(american_to_decimal(dec!(0)), Some(dec!(1)));
    }

    #[test]
    fn test_negative_odds() {
        assert_eq!(american_to_decimal(dec!(-200)), Some(dec!(1.5)));
        assert_eq!(american_to_decimal(dec!(-100)), Some(dec!(2)));
        let d = american_to_decimal(dec!(-110)).unwrap();
        assert_eq!(d.round_dp(6), dec!(1.909091));
    }

    #[test]
    fn test_discontinuity_at_zero() {
        assert_eq!(american_to_decimal(dec!(-1)), Some(dec!(101)));
        assert_eq!(american_to_decimal(dec!(0)), Some(dec!(1)));
        assert_eq!(american_to_decimal(dec!(1)), Some(dec!(1.01)));
    }

    #[test]
    fn test_always_at_least_one() {
        for odds in [-100000, -5000, -110, -1, 0, 1, 110, 5000, 100000] {
            let d = american_to_decimal(Decimal::from(odds)).unwrap();
            assert!(d >= Decimal::ONE, "{odds} -> {d}");
        }
    }

    #[test]
    fn test_monotonic_within_each_side() {
        let negatives = [-100000, -1000, -250, -110, -101, -100, -50, -1];
        let positives = [0, 1, 100, 150, 1000, 100000];
        for side in [&negatives[..], &positives[..]] {
            let decimals: Vec<Decimal> = side
                .iter()
                .map(|o| american_to_decimal(Decimal::from(*o)).unwrap())
                .collect();
            assert!(decimals.windows(2).all(|w| w[0] < w[1]), "{decimals:?}");
        }
    }

    #[test]
    fn test_overflow_is_none() {
        // 100 / 1e-28 does not fit in 96 bits.
        assert_eq!(american_to_decimal(-Decimal::new(1, 28)), None);
    }

    #[test]
    fn test_decimal_to_american() {
        assert_eq!(decimal_to_american(dec!(2.5)), Some(dec!(150)));
        assert_eq!(decimal_to_american(dec!(1.5)), Some(dec!(-200)));
        assert_eq!(decimal_to_american(dec!(1)), Some(dec!(0)));
        assert_eq!(decimal_to_american(dec!(0.9)), None);
    }

    #[test]
    fn test_round_trip() {
        let tolerance = dec!(0.0000000001);
        for odds in [dec!(-350), dec!(-110), dec!(-105.5), dec!(0), dec!(120), dec!(150), dec!(900)] {
            let decimal = american_to_decimal(odds).unwrap();
            let back = decimal_to_american(decimal).unwrap();
            let again = american_to_decimal(back).unwrap();
            assert!((again - decimal).abs() < tolerance, "{odds}: {decimal} vs {again}");
            assert!((back - odds).abs() < tolerance, "{odds} vs {back}");
        }
    }
}
