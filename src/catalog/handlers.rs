//! JSON endpoint handlers
//!
//! The three storefront endpoints: item listing, coupon lookup and
//! checkout. Query parameters come in with the widget's camelCase names;
//! responses are whole-body JSON. A missed coupon lookup answers with
//! `null` rather than an error status.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::{CatalogError, OrderLine};
use crate::cart::models::{Coupon, Item};
use crate::state::SharedState;

/// Creates routes for the catalog endpoints.
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/getItems", get(get_items))
        .route("/getCouponByID", get(get_coupon_by_id))
        .route("/transact", post(transact))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemsQuery {
    start_index: Option<usize>,
    end_index: Option<usize>,
}

/// Endpoint: GET /getItems[?startIndex&endIndex]
async fn get_items(
    State(state): State<SharedState>,
    Query(query): Query<ItemsQuery>,
) -> Json<Vec<Item>> {
    Json(state.catalog.items_slice(query.start_index, query.end_index))
}

#[derive(Debug, Deserialize)]
struct CouponQuery {
    #[serde(rename = "couponID")]
    coupon_id: String,
}

/// Endpoint: GET /getCouponByID?couponID=<code>
///
/// Unknown codes serialize as `null`; the client treats that as "no
/// result", not as a distinct error channel.
async fn get_coupon_by_id(
    State(state): State<SharedState>,
    Query(query): Query<CouponQuery>,
) -> Json<Option<Coupon>> {
    Json(state.catalog.coupon_by_id(&query.coupon_id))
}

#[derive(Debug, Deserialize)]
struct TransactRequest {
    #[serde(rename = "itemsData")]
    items_data: Vec<OrderLine>,
    #[serde(rename = "couponIDs", default)]
    coupon_ids: Vec<String>,
}

/// Endpoint: POST /transact
async fn transact(
    State(state): State<SharedState>,
    Json(payload): Json<TransactRequest>,
) -> Response {
    match state
        .catalog
        .transact(&payload.items_data, &payload.coupon_ids)
    {
        Ok(receipt) => Json(receipt).into_response(),
        Err(err) => err.into_response(),
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match self {
            CatalogError::UnknownItem(_) => StatusCode::NOT_FOUND,
            CatalogError::InsufficientStock { .. } => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}
