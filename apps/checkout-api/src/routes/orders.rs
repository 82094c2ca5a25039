use axum::extract::State;
use axum::Json;

use checkout_core::Order;

use crate::error::ApiResult;
use crate::state::AppState;

/// `GET /v0/orders`: newest first.
pub async fn list_orders(State(state): State<AppState>) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.pipeline.list_orders().await?))
}
