//! Cart Domain Models
//!
//! Data structures shared by the catalog, the cart engine and the wire
//! format. Field renames follow the JSON names the storefront widgets use.

use serde::{Deserialize, Serialize};

/// Catalog item identifier.
pub type ItemId = u64;

/// A catalog entity. Immutable once loaded; the cart keeps its own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique catalog key
    pub id: ItemId,

    /// Display name of the product
    pub name: String,

    /// Unit price, non-negative, two-decimal precision
    pub price: f64,

    /// The item's own percentage discount (0–100)
    #[serde(default)]
    pub discount: u8,

    /// Available stock
    pub quantity: u32,

    /// Optional catalog copy, shown in the item table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional image URL for the catalog row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One item's entry in the cart: a snapshot of the item plus the amount
/// the shopper currently holds.
///
/// Serializes flat (item fields alongside `amount`) so a rendered cart row
/// looks like an item row with an amount column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: Item,

    /// Current amount in the cart, `0 ..= item.quantity`
    pub amount: u32,
}

/// A coupon code. Carries either a global percentage discount or a free
/// item; `discount > 0` marks the percentage variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    #[serde(rename = "couponID")]
    pub coupon_id: String,

    /// Percentage discount (0–100), the percentage-coupon variant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,

    /// Item granted at no extra charge, the free-item variant
    #[serde(rename = "freeItem", default, skip_serializing_if = "Option::is_none")]
    pub free_item: Option<Item>,
}

/// Resolved coupon variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CouponKind<'a> {
    Percent(u8),
    FreeItem(&'a Item),
}

impl Coupon {
    /// Classifies the coupon. A zero/absent discount with no free item
    /// yields `None`; such coupons are ignored when applied.
    pub fn kind(&self) -> Option<CouponKind<'_>> {
        match self.discount {
            Some(d) if d > 0 => Some(CouponKind::Percent(d)),
            _ => self.free_item.as_ref().map(CouponKind::FreeItem),
        }
    }

    /// Convenience constructor for a percentage coupon.
    pub fn percent(coupon_id: impl Into<String>, discount: u8) -> Self {
        Self {
            coupon_id: coupon_id.into(),
            discount: Some(discount),
            free_item: None,
        }
    }

    /// Convenience constructor for a free-item coupon.
    pub fn free_item(coupon_id: impl Into<String>, item: Item) -> Self {
        Self {
            coupon_id: coupon_id.into(),
            discount: None,
            free_item: Some(item),
        }
    }
}
