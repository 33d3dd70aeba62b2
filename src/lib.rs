//! Storefront Cart Library
//!
//! This library provides the cart pricing and synchronization engine for a
//! browser-style storefront demo, together with the in-memory catalog and
//! the HTTP routing that back it.

// Domain modules
pub mod bus;
pub mod cart;
pub mod catalog;

// Infrastructure
pub mod router;
pub mod state;
