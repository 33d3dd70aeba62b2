//! Remote Data Gateway
//!
//! The cart controller's only network seam. The storefront talks to three
//! endpoints (`/getItems`, `/getCouponByID`, `/transact`); the trait
//! mirrors that contract, with "empty body" responses mapped to `None`.
//! The engine itself only performs coupon lookups; the other calls belong
//! to the catalog and checkout surfaces.

use std::sync::Arc;

use futures_util::future::BoxFuture;

use super::models::{Coupon, Item};
use crate::catalog::{Catalog, CatalogError, OrderLine, Receipt};

pub trait RemoteGateway {
    /// Looks a coupon up by code; unknown codes yield `None`.
    fn coupon_by_id(&self, coupon_id: &str) -> BoxFuture<'static, Option<Coupon>>;

    /// Fetches a page of catalog items, both bounds optional.
    fn items(
        &self,
        start_index: Option<usize>,
        end_index: Option<usize>,
    ) -> BoxFuture<'static, Vec<Item>>;

    /// Submits a checkout order.
    fn transact(
        &self,
        lines: Vec<OrderLine>,
        coupon_ids: Vec<String>,
    ) -> BoxFuture<'static, Result<Receipt, CatalogError>>;
}

/// Gateway backed by the in-process catalog, used by the demo wiring and
/// the tests. A browser deployment would substitute an HTTP client here.
#[derive(Clone)]
pub struct CatalogGateway {
    catalog: Arc<Catalog>,
}

impl CatalogGateway {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl RemoteGateway for CatalogGateway {
    fn coupon_by_id(&self, coupon_id: &str) -> BoxFuture<'static, Option<Coupon>> {
        let result = self.catalog.coupon_by_id(coupon_id);
        Box::pin(async move { result })
    }

    fn items(
        &self,
        start_index: Option<usize>,
        end_index: Option<usize>,
    ) -> BoxFuture<'static, Vec<Item>> {
        let items = self.catalog.items_slice(start_index, end_index);
        Box::pin(async move { items })
    }

    fn transact(
        &self,
        lines: Vec<OrderLine>,
        coupon_ids: Vec<String>,
    ) -> BoxFuture<'static, Result<Receipt, CatalogError>> {
        let result = self.catalog.transact(&lines, &coupon_ids);
        Box::pin(async move { result })
    }
}
