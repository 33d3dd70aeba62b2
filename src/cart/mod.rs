//! Cart Domain Module
//!
//! The cart pricing and synchronization engine:
//! - Domain models (Item, Coupon, CartLine)
//! - Event topics and payloads for the bus
//! - Pure pricing functions
//! - The mutable cart aggregate (CartStore)
//! - The event-driven controller and its collaborator contracts

pub mod controller;
pub mod events;
pub mod gateway;
pub mod models;
pub mod pricing;
pub mod store;

// Re-export commonly used types for convenience
pub use controller::{CartController, CartView, CouponOutcome};
pub use models::{CartLine, Coupon, CouponKind, Item, ItemId};
pub use store::CartStore;
