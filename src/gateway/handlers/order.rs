//! Order handlers (checkout, listings, status updates)

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::auth::AuthUser;
use crate::store::models::{OrderDetail, OrderSummary};
use crate::store::orders::OrderRepository;

use super::super::state::AppState;
use super::super::types::{
    ApiError, ApiResult, CreateOrderRequest, DeletedData, OrderResponseData,
    UpdateOrderStatusRequest, ok, parse_order_request, parse_status, parse_uuid,
};

/// Place an order
///
/// POST /api/v1/orders
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order placed", body = OrderResponseData, content_type = "application/json"),
        (status = 400, description = "Malformed body or identifier"),
        (status = 404, description = "Address or product not found"),
        (status = 409, description = "Insufficient stock")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateOrderRequest>,
) -> ApiResult<OrderResponseData> {
    tracing::info!(user_id = %user.user_id, lines = req.products.len(), "checkout received");

    // 1. Validate shape and parse identifiers
    let new_order = parse_order_request(user.user_id, &req)?;

    // 2. Place transactionally: existence + stock checks, price
    //    accumulation, insert and decrement commit together
    let order = OrderRepository::place(state.pool(), &new_order).await?;

    // 3. Return the created order
    ok(OrderResponseData::from(order))
}

/// All orders, populated (admin)
///
/// GET /api/v1/orders
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderDetail], content_type = "application/json")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(State(state): State<Arc<AppState>>) -> ApiResult<Vec<OrderDetail>> {
    let orders = OrderRepository::list_all(state.pool()).await?;
    ok(orders)
}

/// Orders created today, server-local time (admin)
///
/// GET /api/v1/orders/recent
#[utoipa::path(
    get,
    path = "/api/v1/orders/recent",
    responses(
        (status = 200, description = "Today's orders", body = [OrderDetail], content_type = "application/json")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn recent_orders(State(state): State<Arc<AppState>>) -> ApiResult<Vec<OrderDetail>> {
    let orders = OrderRepository::list_recent(state.pool()).await?;
    ok(orders)
}

/// The caller's orders. An empty list is a valid response.
///
/// GET /api/v1/orders/mine
#[utoipa::path(
    get,
    path = "/api/v1/orders/mine",
    responses(
        (status = 200, description = "Caller's orders", body = [OrderSummary], content_type = "application/json")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn my_orders(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<OrderSummary>> {
    let orders = OrderRepository::list_for_user(state.pool(), user.user_id).await?;
    ok(orders)
}

/// One order by id, populated (admin)
///
/// GET /api/v1/orders/{order_id}
#[utoipa::path(
    get,
    path = "/api/v1/orders/{order_id}",
    params(("order_id" = String, Path, description = "Order id (UUID)")),
    responses(
        (status = 200, description = "Order details", body = OrderDetail, content_type = "application/json"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> ApiResult<OrderDetail> {
    let id = parse_uuid(&order_id, "order")?;
    match OrderRepository::get(state.pool(), id).await? {
        Some(order) => ok(order),
        None => ApiError::not_found("order not found").into_err(),
    }
}

/// Update only the status field
///
/// PUT /api/v1/orders/{order_id}
#[utoipa::path(
    put,
    path = "/api/v1/orders/{order_id}",
    params(("order_id" = String, Path, description = "Order id (UUID)")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Updated order", body = OrderResponseData, content_type = "application/json"),
        (status = 400, description = "Malformed id or unknown status"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> ApiResult<OrderResponseData> {
    // 1. Parse id and status
    let id = parse_uuid(&order_id, "order")?;
    let status = parse_status(&req)?;

    // 2. Apply; repeating a transition yields the same final state
    let order = OrderRepository::update_status(state.pool(), id, status).await?;
    tracing::info!(order_id = %id, status = %status, "order status updated");
    ok(OrderResponseData::from(order))
}

/// Delete an order
///
/// DELETE /api/v1/orders/{order_id}
#[utoipa::path(
    delete,
    path = "/api/v1/orders/{order_id}",
    params(("order_id" = String, Path, description = "Order id (UUID)")),
    responses(
        (status = 200, description = "Deletion confirmation", body = DeletedData, content_type = "application/json"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> ApiResult<DeletedData> {
    let id = parse_uuid(&order_id, "order")?;
    OrderRepository::delete(state.pool(), id).await?;
    tracing::info!(order_id = %id, "order deleted");
    ok(DeletedData { deleted: true })
}
