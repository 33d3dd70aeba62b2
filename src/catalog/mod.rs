//! Catalog Backend
//!
//! In-memory item and coupon storage behind the three JSON endpoints.
//! Items are keyed by id and coupons by code; `DashMap` lets the axum
//! handlers share the catalog without an external mutex. Checkout prices
//! orders with the same pricing engine the cart uses.

pub mod handlers;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::cart::models::{Coupon, CouponKind, Item, ItemId};
use crate::cart::pricing::{self, DISCOUNT_CAP};

pub use handlers::routes;

/// One requested line of a checkout order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: ItemId,
    pub amount: u32,
}

/// Checkout result returned by `/transact`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_id: String,
    pub total_bill: f64,
    pub items: Vec<OrderLine>,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Item {0} does not exist.")]
    UnknownItem(ItemId),
    #[error("Item {id}: requested {requested}, only {available} in stock.")]
    InsufficientStock {
        id: ItemId,
        requested: u32,
        available: u32,
    },
}

#[derive(Debug, Default)]
pub struct Catalog {
    items: DashMap<ItemId, Item>,
    coupons: DashMap<String, Coupon>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog pre-loaded with the demo storefront data.
    pub fn seeded() -> Self {
        let catalog = Self::new();
        for item in demo_items() {
            catalog.upsert_item(item);
        }
        for coupon in demo_coupons() {
            catalog.upsert_coupon(coupon);
        }
        catalog
    }

    pub fn upsert_item(&self, item: Item) {
        self.items.insert(item.id, item);
    }

    pub fn upsert_coupon(&self, coupon: Coupon) {
        self.coupons.insert(coupon.coupon_id.clone(), coupon);
    }

    pub fn item_by_id(&self, id: ItemId) -> Option<Item> {
        self.items.get(&id).map(|i| i.clone())
    }

    pub fn coupon_by_id(&self, coupon_id: &str) -> Option<Coupon> {
        self.coupons.get(coupon_id).map(|c| c.clone())
    }

    /// Items ordered by id, sliced to the half-open `[start, end)` range.
    /// Absent bounds default to the whole list; out-of-range bounds clamp.
    pub fn items_slice(&self, start_index: Option<usize>, end_index: Option<usize>) -> Vec<Item> {
        let mut items: Vec<Item> = self.items.iter().map(|e| e.value().clone()).collect();
        items.sort_by_key(|i| i.id);

        let len = items.len();
        let start = start_index.unwrap_or(0).min(len);
        let end = end_index.unwrap_or(len).clamp(start, len);
        items[start..end].to_vec()
    }

    /// Prices and commits a checkout order.
    ///
    /// Validates the whole order against the catalog first; only a fully
    /// valid order decrements stock. Submitted coupon codes resolve to a
    /// cumulative percentage discount (unknown codes are skipped, matching
    /// the lookup semantics) and free-item coupons contribute their item
    /// as an extra order line, checked and decremented like any other.
    /// Lines repeating an item id add up before the stock check.
    pub fn transact(
        &self,
        lines: &[OrderLine],
        coupon_ids: &[String],
    ) -> Result<Receipt, CatalogError> {
        let mut coupon_discount: u8 = 0;
        let mut granted: Vec<ItemId> = Vec::new();
        for code in coupon_ids {
            match self.coupon_by_id(code).as_ref().and_then(Coupon::kind) {
                Some(CouponKind::Percent(d)) => {
                    coupon_discount = coupon_discount.saturating_add(d).min(DISCOUNT_CAP);
                }
                Some(CouponKind::FreeItem(item)) => granted.push(item.id),
                None => {}
            }
        }

        // Requested amount per id, in order of first appearance. Validating
        // per line would let a repeated id pass the stock check and then
        // underflow the decrement.
        let mut requested: Vec<OrderLine> = Vec::with_capacity(lines.len());
        let order = lines
            .iter()
            .map(|l| (l.id, l.amount))
            .chain(granted.into_iter().map(|id| (id, 1)));
        for (id, amount) in order {
            match requested.iter_mut().find(|r| r.id == id) {
                Some(entry) => entry.amount = entry.amount.saturating_add(amount),
                None => requested.push(OrderLine { id, amount }),
            }
        }

        let mut total = 0.0;
        for line in &requested {
            let item = self
                .item_by_id(line.id)
                .ok_or(CatalogError::UnknownItem(line.id))?;
            if line.amount > item.quantity {
                return Err(CatalogError::InsufficientStock {
                    id: line.id,
                    requested: line.amount,
                    available: item.quantity,
                });
            }
            total += pricing::effective_price(&item, coupon_discount) * f64::from(line.amount);
        }

        // Order is valid; decrement stock.
        for line in &requested {
            if let Some(mut item) = self.items.get_mut(&line.id) {
                item.quantity -= line.amount;
            }
        }
        let committed = requested;

        let receipt = Receipt {
            transaction_id: Uuid::new_v4().simple().to_string(),
            total_bill: pricing::round2(total),
            items: committed,
        };
        info!(
            transaction = %receipt.transaction_id,
            total = receipt.total_bill,
            "transaction committed"
        );
        Ok(receipt)
    }
}

fn demo_items() -> Vec<Item> {
    let entry = |id, name: &str, price, discount, quantity, description: &str| Item {
        id,
        name: name.into(),
        price,
        discount,
        quantity,
        description: Some(description.into()),
        image: Some(format!("img/{id}.png")),
    };
    vec![
        entry(1, "Notebook", 4.99, 0, 120, "A5 ruled notebook"),
        entry(2, "Fountain pen", 24.5, 10, 35, "Fine nib, converter included"),
        entry(3, "Desk lamp", 39.99, 0, 18, "Warm LED, dimmable"),
        entry(4, "Backpack", 59.0, 25, 12, "20l roll-top"),
        entry(5, "Water bottle", 14.95, 0, 60, "Insulated, 750ml"),
        entry(6, "Headphones", 89.9, 15, 9, "Closed back, wired"),
        entry(7, "Sketchbook", 9.5, 0, 44, "Heavyweight paper"),
        entry(8, "Travel mug", 18.0, 5, 0, "Out of stock demo item"),
        entry(9, "Keyboard", 129.0, 20, 7, "Tenkeyless, hot-swap"),
        entry(10, "Poster", 7.25, 0, 200, "Storefront launch print"),
    ]
}

fn demo_coupons() -> Vec<Coupon> {
    vec![
        Coupon::percent("SAVE10", 10),
        Coupon::percent("HALF", 50),
        Coupon::free_item(
            "FREEPOSTER",
            Item {
                id: 10,
                name: "Poster".into(),
                price: 7.25,
                discount: 0,
                quantity: 200,
                description: Some("Storefront launch print".into()),
                image: Some("img/10.png".into()),
            },
        ),
    ]
}
