//! Pricing Engine
//!
//! Pure discount arithmetic. Unit prices are rounded once per computation;
//! aggregates round once at the end, never on intermediate sums.

use super::models::Item;

/// No discount may exceed 100%.
pub const DISCOUNT_CAP: u8 = 100;

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The item's own discount stacked with the cumulative coupon discount,
/// capped at 100.
pub fn effective_discount(item: &Item, coupon_discount: u8) -> u8 {
    item.discount.saturating_add(coupon_discount).min(DISCOUNT_CAP)
}

/// Unit price after the effective discount, rounded to two decimals.
pub fn effective_price(item: &Item, coupon_discount: u8) -> f64 {
    let discount = effective_discount(item, coupon_discount);
    round2(item.price * f64::from(100 - discount) / 100.0)
}
