//! Order API integration tests.
//!
//! Drives the full router in-process and checks endpoint round trips,
//! status-code mapping, and the assignment/cascade semantics end to end.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use courier_api::{app, AppState};

fn test_app() -> Router {
    app(AppState::new())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, String) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, Method::GET, uri, None).await
}

async fn add_order(app: &Router, order_id: &str, delivery_time: &str) -> (StatusCode, String) {
    send(
        app,
        Method::POST,
        "/orders/addOrder",
        Some(json!({ "orderId": order_id, "deliveryTime": delivery_time })),
    )
    .await
}

async fn add_partner(app: &Router, partner_id: &str) -> (StatusCode, String) {
    send(
        app,
        Method::POST,
        &format!("/orders/addPartner/{}", partner_id),
        None,
    )
    .await
}

async fn assign(app: &Router, order_id: &str, partner_id: &str) -> (StatusCode, String) {
    send(
        app,
        Method::PUT,
        &format!(
            "/orders/addOrderPartnerPair?orderId={}&partnerId={}",
            order_id, partner_id
        ),
        None,
    )
    .await
}

// =============================================================================
// Creation and lookup
// =============================================================================

#[tokio::test]
async fn test_add_and_get_order() {
    let app = test_app();

    let (status, body) = add_order(&app, "O1", "10:00").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, "New order added successfully");

    let (status, body) = get(&app, "/orders/getOrderById/O1").await;
    assert_eq!(status, StatusCode::OK);
    let order: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        order,
        json!({
            "orderId": "O1",
            "deliveryTime": "10:00",
            "assignedPartnerId": null,
        })
    );
}

#[tokio::test]
async fn test_add_and_get_partner() {
    let app = test_app();

    let (status, body) = add_partner(&app, "P1").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, "New delivery partner added successfully");

    let (status, body) = get(&app, "/orders/getPartnerById/P1").await;
    assert_eq!(status, StatusCode::OK);
    let partner: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        partner,
        json!({
            "partnerId": "P1",
            "assignedOrderIds": [],
        })
    );
}

#[tokio::test]
async fn test_get_all_orders_in_creation_order() {
    let app = test_app();
    add_order(&app, "O2", "11:00").await;
    add_order(&app, "O1", "09:00").await;
    add_order(&app, "O3", "13:00").await;

    let (status, body) = get(&app, "/orders/getAllOrders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"["O2","O1","O3"]"#);
}

// =============================================================================
// Assignment
// =============================================================================

#[tokio::test]
async fn test_order_partner_pair_flow() {
    let app = test_app();
    add_partner(&app, "P1").await;
    add_order(&app, "O1", "10:00").await;

    let (status, body) = assign(&app, "O1", "P1").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, "New order-partner pair added successfully");

    let (status, body) = get(&app, "/orders/getOrderCountByPartnerId/P1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "1");

    let (_, body) = get(&app, "/orders/getOrdersByPartnerId/P1").await;
    assert_eq!(body, r#"["O1"]"#);

    let (_, body) = get(&app, "/orders/getOrderById/O1").await;
    let order: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(order["assignedPartnerId"], "P1");

    let (_, body) = get(&app, "/orders/getCountOfUnassignedOrders").await;
    assert_eq!(body, "0");
}

#[tokio::test]
async fn test_unassigned_count_tracks_assignment() {
    let app = test_app();
    add_partner(&app, "P1").await;
    add_order(&app, "O1", "10:00").await;
    add_order(&app, "O2", "11:00").await;

    let (_, body) = get(&app, "/orders/getCountOfUnassignedOrders").await;
    assert_eq!(body, "2");

    assign(&app, "O1", "P1").await;
    let (_, body) = get(&app, "/orders/getCountOfUnassignedOrders").await;
    assert_eq!(body, "1");
}

// =============================================================================
// Delivery-time queries
// =============================================================================

#[tokio::test]
async fn test_delivery_time_queries() {
    let app = test_app();
    add_partner(&app, "P1").await;
    add_order(&app, "O1", "10:00").await;
    add_order(&app, "O2", "14:30").await;
    assign(&app, "O1", "P1").await;
    assign(&app, "O2", "P1").await;

    let (status, body) = get(&app, "/orders/getOrderCountByPartnerId/P1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "2");

    let (status, body) = get(&app, "/orders/getLastDeliveryTimeByPartnerId/P1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "14:30");

    let (status, body) =
        get(&app, "/orders/getOrdersLeftAfterGivenTimeByPartnerId/12:00/P1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "1");
}

#[tokio::test]
async fn test_last_delivery_time_on_empty_partner_is_conflict() {
    let app = test_app();
    add_partner(&app, "P1").await;

    // partner exists but carries nothing: 409, not 404
    let (status, _) = get(&app, "/orders/getLastDeliveryTimeByPartnerId/P1").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = get(&app, "/orders/getLastDeliveryTimeByPartnerId/P9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Deletion cascades
// =============================================================================

#[tokio::test]
async fn test_delete_partner_unassigns_orders() {
    let app = test_app();
    add_partner(&app, "P1").await;
    add_order(&app, "O1", "10:00").await;
    add_order(&app, "O2", "14:30").await;
    assign(&app, "O1", "P1").await;
    assign(&app, "O2", "P1").await;

    let (status, body) = send(&app, Method::DELETE, "/orders/deletePartnerById/P1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "P1 removed successfully");

    let (status, _) = get(&app, "/orders/getPartnerById/P1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // orders survive the cascade, back in the unassigned pool
    let (_, body) = get(&app, "/orders/getAllOrders").await;
    assert_eq!(body, r#"["O1","O2"]"#);
    let (_, body) = get(&app, "/orders/getCountOfUnassignedOrders").await;
    assert_eq!(body, "2");
}

#[tokio::test]
async fn test_delete_order_detaches_from_partner() {
    let app = test_app();
    add_partner(&app, "P1").await;
    add_order(&app, "O1", "10:00").await;
    assign(&app, "O1", "P1").await;

    let (status, body) = send(&app, Method::DELETE, "/orders/deleteOrderById/O1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "O1 removed successfully");

    let (_, body) = get(&app, "/orders/getOrderCountByPartnerId/P1").await;
    assert_eq!(body, "0");
    let (_, body) = get(&app, "/orders/getAllOrders").await;
    assert_eq!(body, "[]");
}

// =============================================================================
// Error mapping
// =============================================================================

#[tokio::test]
async fn test_duplicate_order_is_conflict() {
    let app = test_app();
    add_order(&app, "O1", "10:00").await;

    let (status, body) = add_order(&app, "O1", "11:00").await;
    assert_eq!(status, StatusCode::CONFLICT);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert!(error["error"].as_str().unwrap().contains("O1"));
}

#[tokio::test]
async fn test_malformed_input_is_bad_request() {
    let app = test_app();

    let (status, _) = add_order(&app, "O1", "25:99").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = add_order(&app, "", "10:00").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    add_partner(&app, "P1").await;
    let (status, _) =
        get(&app, "/orders/getOrdersLeftAfterGivenTimeByPartnerId/later/P1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let app = test_app();
    add_order(&app, "O1", "10:00").await;

    for uri in [
        "/orders/getOrderById/O9",
        "/orders/getPartnerById/P9",
        "/orders/getOrderCountByPartnerId/P9",
        "/orders/getOrdersByPartnerId/P9",
        "/orders/getOrdersLeftAfterGivenTimeByPartnerId/12:00/P9",
    ] {
        let (status, _) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", uri);
    }

    let (status, _) = send(&app, Method::DELETE, "/orders/deleteOrderById/O9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, "/orders/deletePartnerById/P9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = assign(&app, "O1", "P9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
