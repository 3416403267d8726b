//! Common utility functions for income calculations.
//!
//! This module provides shared functionality used across the calculator and
//! the currency converter, including rounding, percentage shares and
//! overflow-checked arithmetic.

use rust_decimal::Decimal;
use thiserror::Error;

/// Number of weeks assumed in a month wherever a weekly figure is scaled up.
pub const WEEKS_PER_MONTH: u8 = 4;

/// A derived quantity does not fit in a [`Decimal`].
///
/// Carries the name of the quantity being computed.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("{0} is too large to compute")]
pub struct OverflowError(pub &'static str);

/// `lhs + rhs`, or [`OverflowError`] naming `quantity`.
pub fn checked_add(
    lhs: Decimal,
    rhs: Decimal,
    quantity: &'static str,
) -> Result<Decimal, OverflowError> {
    lhs.checked_add(rhs).ok_or(OverflowError(quantity))
}

/// `lhs × rhs`, or [`OverflowError`] naming `quantity`.
pub fn checked_mul(
    lhs: Decimal,
    rhs: Decimal,
    quantity: &'static str,
) -> Result<Decimal, OverflowError> {
    lhs.checked_mul(rhs).ok_or(OverflowError(quantity))
}

/// `lhs ÷ rhs`, or [`OverflowError`] naming `quantity`. Callers guard zero
/// divisors themselves; a zero `rhs` is reported as an overflow.
pub fn checked_div(
    lhs: Decimal,
    rhs: Decimal,
    quantity: &'static str,
) -> Result<Decimal, OverflowError> {
    lhs.checked_div(rhs).ok_or(OverflowError(quantity))
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use wtb_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `part` as a percentage of `whole`, rounded to two places.
///
/// A non-positive `whole`, or a share too large to represent, yields zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use wtb_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(1), dec!(3)), dec!(33.33));
/// assert_eq!(percent_of(dec!(10), dec!(0)), dec!(0));
/// ```
pub fn percent_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        .map(round_half_up)
        .unwrap_or(Decimal::ZERO)
}
