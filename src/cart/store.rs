//! Cart Store
//!
//! The single mutable cart aggregate: lines keyed by item id, the applied
//! coupon list and the cumulative coupon discount. Every mutation
//! recomputes the total bill before returning; there is no deferred or
//! batched recomputation.
//!
//! Amounts are clamped to `[0, item.quantity]` at this boundary. The
//! storefront UI clamps too, but the store no longer trusts its callers.

use std::collections::HashMap;

use tracing::debug;

use super::models::{CartLine, Coupon, CouponKind, Item, ItemId};
use super::pricing::{self, DISCOUNT_CAP};

#[derive(Debug, Default)]
pub struct CartStore {
    lines: HashMap<ItemId, CartLine>,
    coupons: Vec<Coupon>,
    coupon_discount: u8,
    total_bill: f64,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item`, creating the line on first add.
    ///
    /// The line keeps its own copy of the item; later catalog changes do
    /// not leak into the cart.
    pub fn add_item(&mut self, item: &Item) {
        let line = self.lines.entry(item.id).or_insert_with(|| CartLine {
            item: item.clone(),
            amount: 0,
        });
        line.amount = (line.amount + 1).min(line.item.quantity);
        debug!(item = item.id, amount = line.amount, "cart add");
        self.recompute_total();
    }

    /// Removes one unit of `item`. Absent lines and amount 0 are no-ops;
    /// amounts never go negative.
    pub fn remove_item(&mut self, item: &Item) {
        if let Some(line) = self.lines.get_mut(&item.id) {
            line.amount = line.amount.saturating_sub(1);
            debug!(item = item.id, amount = line.amount, "cart remove");
        }
        self.recompute_total();
    }

    /// Sets `item`'s amount outright, clamped to `[0, item.quantity]`.
    ///
    /// The first touch creates the line; afterwards the existing snapshot
    /// is reused, so an amount of 0 followed by a new amount works without
    /// re-cloning from catalog state.
    pub fn set_item_amount(&mut self, item: &Item, amount: u32) {
        let line = self.lines.entry(item.id).or_insert_with(|| CartLine {
            item: item.clone(),
            amount: 0,
        });
        line.amount = amount.min(line.item.quantity);
        debug!(item = item.id, amount = line.amount, "cart set amount");
        self.recompute_total();
    }

    /// Empties the cart: lines, coupons and the cumulative discount.
    ///
    /// Returns the ids of the lines that existed before the reset so the
    /// controller can notify each per-item widget exactly once.
    pub fn reset(&mut self) -> Vec<ItemId> {
        let cleared: Vec<ItemId> = self.lines.keys().copied().collect();
        self.lines.clear();
        self.coupons.clear();
        self.coupon_discount = 0;
        self.recompute_total();
        debug!(lines = cleared.len(), "cart reset");
        cleared
    }

    /// Applies a coupon. Duplicate codes are a no-op, as are coupons that
    /// carry neither a discount nor a free item. Returns whether the
    /// coupon was applied.
    pub fn apply_coupon(&mut self, coupon: Coupon) -> bool {
        if self.has_coupon(&coupon.coupon_id) {
            return false;
        }
        match coupon.kind() {
            Some(CouponKind::Percent(d)) => {
                self.coupon_discount =
                    self.coupon_discount.saturating_add(d).min(DISCOUNT_CAP);
                self.recompute_total();
            }
            Some(CouponKind::FreeItem(item)) => {
                let item = item.clone();
                self.add_item(&item);
            }
            None => return false,
        }
        debug!(coupon = %coupon.coupon_id, discount = self.coupon_discount, "coupon applied");
        self.coupons.push(coupon);
        true
    }

    /// True when a coupon with this code has already been applied.
    pub fn has_coupon(&self, coupon_id: &str) -> bool {
        self.coupons.iter().any(|c| c.coupon_id == coupon_id)
    }

    /// Lines with amount > 0, eligible for display and totals.
    /// Iteration order is not contract-significant.
    pub fn visible_lines(&self) -> Vec<&CartLine> {
        self.lines.values().filter(|l| l.amount > 0).collect()
    }

    /// The line for `id`, visible or not.
    pub fn line(&self, id: ItemId) -> Option<&CartLine> {
        self.lines.get(&id)
    }

    /// Applied coupons in application order.
    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Cumulative percentage discount from applied coupons, capped at 100.
    pub fn coupon_discount(&self) -> u8 {
        self.coupon_discount
    }

    /// Current derived total, two-decimal.
    pub fn total_bill(&self) -> f64 {
        self.total_bill
    }

    fn recompute_total(&mut self) {
        let sum: f64 = self
            .lines
            .values()
            .filter(|l| l.amount > 0)
            .map(|l| pricing::effective_price(&l.item, self.coupon_discount) * f64::from(l.amount))
            .sum();
        self.total_bill = pricing::round2(sum);
    }
}
