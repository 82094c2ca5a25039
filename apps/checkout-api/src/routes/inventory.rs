//! Inventory listing, ingestion, pricing and purchase.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use checkout_core::{Item, PriceQuote, PurchaseReceipt};

use crate::error::ApiResult;
use crate::state::AppState;

/// Body of the pricing and purchase endpoints.
#[derive(Debug, Deserialize)]
pub struct SkuListRequest {
    #[serde(default)]
    pub skus: Vec<String>,
}

/// Body of `POST /v0/inventory/items`.
#[derive(Debug, Deserialize)]
pub struct AddItemsRequest {
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Serialize)]
pub struct AddItemsResponse {
    pub count: usize,
}

/// `GET /v0/inventory/items`
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    Ok(Json(state.pipeline.list_items().await?))
}

/// `POST /v0/inventory/items`
pub async fn add_items(
    State(state): State<AppState>,
    body: Result<Json<AddItemsRequest>, JsonRejection>,
) -> ApiResult<Json<AddItemsResponse>> {
    let Json(request) = body?;
    let count = state.pipeline.add_items(&request.items).await?;
    Ok(Json(AddItemsResponse { count }))
}

/// `GET /v0/inventory/price/{key}`: `key` is a SKU or an item name.
pub async fn price_one(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Json<PriceQuote>> {
    Ok(Json(state.pipeline.quote_by_key(&key).await?))
}

/// `POST /v0/inventory/price`
pub async fn price_list(
    State(state): State<AppState>,
    body: Result<Json<SkuListRequest>, JsonRejection>,
) -> ApiResult<Json<PriceQuote>> {
    let Json(request) = body?;
    Ok(Json(state.pipeline.quote(&request.skus).await?))
}

/// `POST /v0/inventory/items/purchase`
pub async fn purchase(
    State(state): State<AppState>,
    body: Result<Json<SkuListRequest>, JsonRejection>,
) -> ApiResult<Json<PurchaseReceipt>> {
    let Json(request) = body?;
    Ok(Json(state.pipeline.purchase(&request.skus).await?))
}
