//! Half-up decimal rounding helpers

use rust_decimal::{Decimal, RoundingStrategy};

/// Divide and round half-up to `scale` fractional digits.
///
/// Rounds once against the exact remainder, so a quotient that
/// `Decimal` division would itself round at 28 digits still lands on the
/// correct side of a midpoint. `None` on division by zero, overflow or a
/// scale above 28.
pub fn divide_half_up(dividend: Decimal, divisor: Decimal, scale: u32) -> Option<Decimal> {
    if divisor.is_zero() {
        return None;
    }
    let ulp = Decimal::try_new(1, scale).ok()?;
    let (n, d) = (dividend.abs(), divisor.abs());

    let mut quotient = n
        .checked_div(d)?
        .round_dp_with_strategy(scale, RoundingStrategy::ToZero);
    let step = ulp.checked_mul(d)?;
    if step.is_zero() {
        // Below representable precision; the division's own rounding is all there is
        return dividend
            .checked_div(divisor)
            .map(|q| q.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero));
    }
    let mut remainder = n.checked_sub(quotient.checked_mul(d)?)?;

    // Truncated quotient can be one unit off when the 28-digit division rounded
    if remainder.is_sign_negative() && !remainder.is_zero() {
        quotient = quotient.checked_sub(ulp)?;
        remainder = remainder.checked_add(step)?;
    } else if remainder >= step {
        quotient = quotient.checked_add(ulp)?;
        remainder = remainder.checked_sub(step)?;
    }

    if remainder.checked_mul(Decimal::TWO)? >= step {
        quotient = quotient.checked_add(ulp)?;
    }

    if dividend.is_sign_negative() != divisor.is_sign_negative() && !quotient.is_zero() {
        quotient.set_sign_negative(true);
    }
    Some(quotient)
}

/// Round half-up to `digits` significant digits.
pub fn round_significant_half_up(value: Decimal, digits: u32) -> Option<Decimal> {
    if value.is_zero() {
        return Some(Decimal::ZERO);
    }
    value.round_sf_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero)
}
