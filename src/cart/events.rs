//! Event topics and payloads exchanged over the bus.
//!
//! Topic names match the storefront widget contract: the quantity controls
//! publish the three cart mutations, and the cart publishes one
//! `resetItemAmount:<id>` per line during a bulk reset so each per-item
//! amount input can clear itself.

use super::models::{Item, ItemId};

/// Published by the quantity UI: add one unit of `item`.
pub const ADD_ITEM_TO_CART: &str = "addItemToCart";
/// Published by the quantity UI: remove one unit of `item`.
pub const REMOVE_ITEM_FROM_CART: &str = "removeItemFromCart";
/// Published by the quantity UI: set `item`'s amount outright.
pub const SET_ITEM_AMOUNT_IN_CART: &str = "setItemAmountInCart";

/// Topic addressed to a single per-item widget during a cart reset.
pub fn reset_item_amount(id: ItemId) -> String {
    format!("resetItemAmount:{id}")
}

/// Payload shapes carried on the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// `{}`, a notification with no data (reset topics)
    Empty,
    /// `{item}`
    Item { item: Item },
    /// `{item, amount}`
    ItemAmount { item: Item, amount: u32 },
}

impl CartEvent {
    /// The item carried by the event, if any.
    pub fn item(&self) -> Option<&Item> {
        match self {
            CartEvent::Empty => None,
            CartEvent::Item { item } | CartEvent::ItemAmount { item, .. } => Some(item),
        }
    }
}
