//! Integration tests for the API server.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use foodhub_api::{create_app, AppState};
use foodhub_db::{Database, DbConfig, NewCustomer, NewMenuItem};

struct TestApp {
    app: Router,
    db: Database,
    customer_id: i64,
    menu_item_id: i64,
}

async fn setup() -> TestApp {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let customer_id = db
        .catalog()
        .insert_customer(&NewCustomer::new("Sherlock Holmes", "555-0221"))
        .await
        .unwrap();
    let menu_item_id = db
        .catalog()
        .insert_menu_item(&NewMenuItem::new("Margherita", 950, "Pizza"))
        .await
        .unwrap();

    let app = create_app(AppState::new(db.clone()), Duration::from_secs(30));
    TestApp {
        app,
        db,
        customer_id,
        menu_item_id,
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn baker_street(t: &TestApp) -> Value {
    json!({
        "customerId": t.customer_id,
        "deliveryAddress": "221B Baker St",
        "items": [{
            "menuItemId": t.menu_item_id,
            "quantity": 2,
            "unitPrice": 9.50,
            "subtotal": 19.00
        }]
    })
}

async fn place(t: &TestApp) -> i64 {
    let (status, json) = send(&t.app, "POST", "/api/orders", Some(baker_street(t))).await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["orderId"].as_i64().unwrap()
}

async fn put_status(t: &TestApp, order_id: i64, status: &str) -> (StatusCode, Value) {
    send(
        &t.app,
        "PUT",
        "/api/order/status",
        Some(json!({ "orderId": order_id, "status": status })),
    )
    .await
}

#[tokio::test]
async fn test_health_check() {
    let t = setup().await;

    let (status, json) = send(&t.app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], true);
    assert_eq!(json["migrationsApplied"], json["migrationsTotal"]);
}

#[tokio::test]
async fn test_place_baker_street_order() {
    let t = setup().await;

    let (status, json) = send(&t.app, "POST", "/api/orders", Some(baker_street(&t))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], "PENDING");
    assert_eq!(json["totalAmount"], "19.00");
    let order_id = json["orderId"].as_i64().unwrap();
    assert!(order_id > 0);

    let (status, order) = send(&t.app, "GET", &format!("/api/order?id={order_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["id"], order_id);
    assert_eq!(order["customerId"], t.customer_id);
    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["totalAmount"], "19.00");
    assert_eq!(order["totalCents"], 1900);
    assert_eq!(order["deliveryAddress"], "221B Baker St");

    let (status, items) = send(
        &t.app,
        "GET",
        &format!("/api/order/items?orderId={order_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["menuItemId"], t.menu_item_id);
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(items[0]["unitPrice"], "9.50");
    assert_eq!(items[0]["subtotal"], "19.00");
}

#[tokio::test]
async fn test_delivered_immediately_is_invalid_transition() {
    let t = setup().await;
    let order_id = place(&t).await;

    let (status, json) = put_status(&t, order_id, "DELIVERED").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "INVALID_TRANSITION");
    assert_eq!(json["retryable"], false);

    let (_, order) = send(&t.app, "GET", &format!("/api/order?id={order_id}"), None).await;
    assert_eq!(order["status"], "PENDING");
}

#[tokio::test]
async fn test_status_walk() {
    let t = setup().await;
    let order_id = place(&t).await;

    for next in ["CONFIRMED", "PREPARING", "OUT_FOR_DELIVERY", "DELIVERED"] {
        let (status, json) = put_status(&t, order_id, next).await;
        assert_eq!(status, StatusCode::OK, "{json}");
        assert_eq!(json["orderId"], order_id);
        assert_eq!(json["status"], next);
    }

    let (status, json) = put_status(&t, order_id, "CANCELLED").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_status_must_be_an_exact_name() {
    let t = setup().await;
    let order_id = place(&t).await;

    let (status, json) = put_status(&t, order_id, "confirmed").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "status");

    let (_, order) = send(&t.app, "GET", &format!("/api/order?id={order_id}"), None).await;
    assert_eq!(order["status"], "PENDING");

    let (status, json) = put_status(&t, order_id, "SHIPPED").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "status");
}

#[tokio::test]
async fn test_validation_errors() {
    let t = setup().await;

    let mut zero_quantity = baker_street(&t);
    zero_quantity["items"][0]["quantity"] = json!(0);
    let (status, json) = send(&t.app, "POST", "/api/orders", Some(zero_quantity)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "items[0].quantity");
    assert_eq!(json["retryable"], false);

    let mut wrong_subtotal = baker_street(&t);
    wrong_subtotal["items"][0]["subtotal"] = json!(18.99);
    let (status, json) = send(&t.app, "POST", "/api/orders", Some(wrong_subtotal)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["field"], "items[0].subtotal");

    let mut wrong_total = baker_street(&t);
    wrong_total["totalAmount"] = json!(20);
    let (status, json) = send(&t.app, "POST", "/api/orders", Some(wrong_total)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["field"], "totalAmount");

    let mut no_items = baker_street(&t);
    no_items["items"] = json!([]);
    let (status, json) = send(&t.app, "POST", "/api/orders", Some(no_items)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["field"], "items");

    let mut sub_cent = baker_street(&t);
    sub_cent["items"][0]["unitPrice"] = json!(9.505);
    let (status, json) = send(&t.app, "POST", "/api/orders", Some(sub_cent)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["field"], "items[0].unitPrice");

    // Nothing was written
    let (_, orders) = send(&t.app, "GET", "/api/orders", None).await;
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_amounts_are_parsed_from_the_literal() {
    let t = setup().await;

    // Both values round to whole cents as f64 but carry more than two decimals
    let body = format!(
        r#"{{
            "customerId": {},
            "deliveryAddress": "221B Baker St",
            "items": [{{
                "menuItemId": {},
                "quantity": 2,
                "unitPrice": 9.4999999999999999999,
                "subtotal": 18.9999999999999999998
            }}]
        }}"#,
        t.customer_id, t.menu_item_id
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/orders")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = t.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "items[0].unitPrice");

    let (_, orders) = send(&t.app, "GET", "/api/orders", None).await;
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_validation_error() {
    let t = setup().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/orders")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = t.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_references_are_not_found() {
    let t = setup().await;

    let mut unknown_customer = baker_street(&t);
    unknown_customer["customerId"] = json!(9999);
    let (status, json) = send(&t.app, "POST", "/api/orders", Some(unknown_customer)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");

    let (status, _) = send(&t.app, "GET", "/api/order?id=9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&t.app, "GET", "/api/order/items?orderId=9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = put_status(&t, 9999, "CONFIRMED").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = send(&t.app, "GET", "/api/order", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_filters() {
    let t = setup().await;
    let first = place(&t).await;
    let second = place(&t).await;
    put_status(&t, second, "CONFIRMED").await;

    let (status, all) = send(&t.app, "GET", "/api/orders", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&first) && ids.contains(&second));

    let (_, pending) = send(&t.app, "GET", "/api/orders?status=PENDING", None).await;
    let pending = pending.as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["id"], first);

    let uri = format!("/api/orders?customerId={}&status=CONFIRMED", t.customer_id);
    let (_, confirmed) = send(&t.app, "GET", &uri, None).await;
    assert_eq!(confirmed.as_array().unwrap().len(), 1);

    let (_, none) = send(&t.app, "GET", "/api/orders?customerId=424242", None).await;
    assert!(none.as_array().unwrap().is_empty());

    let (status, _) = send(&t.app, "GET", "/api/orders?status=LOST", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cors_preflight() {
    let t = setup().await;

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/orders")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = t.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_store_unavailable_is_retryable() {
    let t = setup().await;
    t.db.close().await;

    let (status, json) = send(&t.app, "POST", "/api/orders", Some(baker_street(&t))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "STORAGE_ERROR");
    assert_eq!(json["retryable"], true);

    let (status, json) = send(&t.app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], "degraded");
}
