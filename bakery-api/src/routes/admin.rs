/// Admin order management
///
/// - `GET /admin` - Orders by delivery date, newest first (`?status=` filter)
/// - `GET /admin/order/:id` - One order
/// - `POST /admin/update_status` - `{ "order_id": 1, "status": "Confirmed" }`
///
/// All routes sit behind the admin guard.

use crate::{
    app::AppState,
    error::{Ack, ApiError, ApiResult},
    extract::{non_empty, ApiJson},
    routes::orders::apply_status,
    session::ShopSession,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use bakery_shared::models::order::{normalize_status, Order};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub orders: Vec<Order>,
    pub status_filter: Option<String>,
    pub flash: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub order_id: Option<i64>,
    pub status: Option<String>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    session: ShopSession,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardView>> {
    let status_filter = non_empty(query.status);
    let orders = Order::list(&state.db, status_filter.as_deref()).await?;

    Ok(Json(DashboardView {
        orders,
        status_filter,
        flash: session.take_flashes().await?,
    }))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> ApiResult<Json<Order>> {
    let order = Order::find_by_id(&state.db, order_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    Ok(Json(order))
}

pub async fn update_status(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> ApiResult<Json<Ack>> {
    let (Some(order_id), Some(status)) = (req.order_id, req.status) else {
        return Err(ApiError::BadRequest("Missing order_id or status".to_string()));
    };
    let status = normalize_status(&status).map_err(ApiError::BadRequest)?;

    apply_status(&state, order_id, status).await?;
    Ok(Json(Ack::with_message("Status updated")))
}
