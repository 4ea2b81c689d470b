use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use courier_domain::{DeliveryPartner, Order};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOrderRequest {
    pub order_id: String,
    pub delivery_time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPartnerPairParams {
    pub order_id: String,
    pub partner_id: String,
}

// ============================================================================
// Routes
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders/addOrder", post(add_order))
        .route("/orders/addPartner/{partnerId}", post(add_partner))
        .route("/orders/addOrderPartnerPair", put(add_order_partner_pair))
        .route("/orders/getOrderById/{orderId}", get(get_order_by_id))
        .route("/orders/getPartnerById/{partnerId}", get(get_partner_by_id))
        .route(
            "/orders/getOrderCountByPartnerId/{partnerId}",
            get(get_order_count_by_partner_id),
        )
        .route(
            "/orders/getOrdersByPartnerId/{partnerId}",
            get(get_orders_by_partner_id),
        )
        .route("/orders/getAllOrders", get(get_all_orders))
        .route(
            "/orders/getCountOfUnassignedOrders",
            get(get_count_of_unassigned_orders),
        )
        .route(
            "/orders/getOrdersLeftAfterGivenTimeByPartnerId/{time}/{partnerId}",
            get(get_orders_left_after_given_time_by_partner_id),
        )
        .route(
            "/orders/getLastDeliveryTimeByPartnerId/{partnerId}",
            get(get_last_delivery_time_by_partner_id),
        )
        .route(
            "/orders/deletePartnerById/{partnerId}",
            delete(delete_partner_by_id),
        )
        .route("/orders/deleteOrderById/{orderId}", delete(delete_order_by_id))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /orders/addOrder
async fn add_order(
    State(state): State<AppState>,
    Json(req): Json<AddOrderRequest>,
) -> Result<(StatusCode, String), AppError> {
    state
        .orders_mut()?
        .add_order(&req.order_id, &req.delivery_time)?;
    Ok((
        StatusCode::CREATED,
        "New order added successfully".to_string(),
    ))
}

/// POST /orders/addPartner/:partnerId
async fn add_partner(
    State(state): State<AppState>,
    Path(partner_id): Path<String>,
) -> Result<(StatusCode, String), AppError> {
    state.orders_mut()?.add_partner(&partner_id)?;
    Ok((
        StatusCode::CREATED,
        "New delivery partner added successfully".to_string(),
    ))
}

/// PUT /orders/addOrderPartnerPair?orderId=&partnerId=
async fn add_order_partner_pair(
    State(state): State<AppState>,
    Query(params): Query<OrderPartnerPairParams>,
) -> Result<(StatusCode, String), AppError> {
    state
        .orders_mut()?
        .add_order_partner_pair(&params.order_id, &params.partner_id)?;
    Ok((
        StatusCode::CREATED,
        "New order-partner pair added successfully".to_string(),
    ))
}

/// GET /orders/getOrderById/:orderId
async fn get_order_by_id(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, AppError> {
    let order = state.orders()?.order_by_id(&order_id)?;
    Ok(Json(order))
}

/// GET /orders/getPartnerById/:partnerId
async fn get_partner_by_id(
    State(state): State<AppState>,
    Path(partner_id): Path<String>,
) -> Result<Json<DeliveryPartner>, AppError> {
    let partner = state.orders()?.partner_by_id(&partner_id)?;
    Ok(Json(partner))
}

/// GET /orders/getOrderCountByPartnerId/:partnerId
async fn get_order_count_by_partner_id(
    State(state): State<AppState>,
    Path(partner_id): Path<String>,
) -> Result<Json<usize>, AppError> {
    let count = state.orders()?.order_count_by_partner_id(&partner_id)?;
    Ok(Json(count))
}

/// GET /orders/getOrdersByPartnerId/:partnerId
async fn get_orders_by_partner_id(
    State(state): State<AppState>,
    Path(partner_id): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let orders = state.orders()?.orders_by_partner_id(&partner_id)?;
    Ok(Json(orders))
}

/// GET /orders/getAllOrders
async fn get_all_orders(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let orders = state.orders()?.all_orders();
    Ok(Json(orders))
}

/// GET /orders/getCountOfUnassignedOrders
async fn get_count_of_unassigned_orders(
    State(state): State<AppState>,
) -> Result<Json<usize>, AppError> {
    let count = state.orders()?.count_of_unassigned_orders();
    Ok(Json(count))
}

/// GET /orders/getOrdersLeftAfterGivenTimeByPartnerId/:time/:partnerId
async fn get_orders_left_after_given_time_by_partner_id(
    State(state): State<AppState>,
    Path((time, partner_id)): Path<(String, String)>,
) -> Result<Json<usize>, AppError> {
    let count = state
        .orders()?
        .orders_left_after_given_time_by_partner_id(&time, &partner_id)?;
    Ok(Json(count))
}

/// GET /orders/getLastDeliveryTimeByPartnerId/:partnerId
async fn get_last_delivery_time_by_partner_id(
    State(state): State<AppState>,
    Path(partner_id): Path<String>,
) -> Result<String, AppError> {
    let time = state.orders()?.last_delivery_time_by_partner_id(&partner_id)?;
    Ok(time)
}

/// DELETE /orders/deletePartnerById/:partnerId
async fn delete_partner_by_id(
    State(state): State<AppState>,
    Path(partner_id): Path<String>,
) -> Result<String, AppError> {
    state.orders_mut()?.delete_partner_by_id(&partner_id)?;
    Ok(format!("{} removed successfully", partner_id))
}

/// DELETE /orders/deleteOrderById/:orderId
async fn delete_order_by_id(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<String, AppError> {
    state.orders_mut()?.delete_order_by_id(&order_id)?;
    Ok(format!("{} removed successfully", order_id))
}
