//! Monetary rounding helpers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to `dp` decimal places, halves away from zero.
pub fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to cents.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::round2;
/// use std::str::FromStr;
/// use rust_decimal::Decimal;
///
/// let d = |s: &str| Decimal::from_str(s).unwrap();
/// assert_eq!(round2(d("123.455")), d("123.46"));
/// assert_eq!(round2(d("-123.455")), d("-123.46"));
/// ```
pub fn round2(value: Decimal) -> Decimal {
    round_to(value, 2)
}

/// Returns `amount × rate / 100`, unrounded.
///
/// Callers pass validated amounts; use [`checked_percent_of`] otherwise.
pub fn percent_of(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate / Decimal::ONE_HUNDRED
}

/// Returns `amount × rate / 100`, or `None` if the product overflows.
pub fn checked_percent_of(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    amount
        .checked_mul(rate)
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
}
