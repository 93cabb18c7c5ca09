//! Router tests: requests go through the full axum stack with an in-memory
//! database, no socket.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use api_server::{build_router, AppConfig, AppState};
use resto_db::{Database, DbConfig};

async fn app_with(config: AppConfig) -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    build_router(AppState::new(db, config))
}

async fn app() -> Router {
    app_with(AppConfig::default()).await
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

struct Menu {
    outlet_id: i64,
    rice_id: i64,
    egg_id: i64,
    dish_id: i64,
}

/// Outlet at 10% tax / 5% service; Fried Rice at $10.00 using 1.5 rice
/// (fixed) and 1 egg (removable); rice stocked at 10, egg at 5.
async fn seed(app: &Router) -> Menu {
    let (status, outlet) = send(
        app,
        Method::POST,
        "/api/outlets",
        Some(json!({"name": "Main Hall", "tax_rate_bps": 1000, "service_charge_bps": 500})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, rice) = send(
        app,
        Method::POST,
        "/api/ingredients",
        Some(json!({"name": "Rice", "quantity": 10.0, "unit": "kg"})),
    )
    .await;
    let (_, egg) = send(
        app,
        Method::POST,
        "/api/ingredients",
        Some(json!({"name": "Egg", "quantity": 5.0, "unit": "pcs", "is_allergen": true})),
    )
    .await;

    let (status, category) = send(
        app,
        Method::POST,
        "/api/menu/category",
        Some(json!({"name": "Mains"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, dish) = send(
        app,
        Method::POST,
        "/api/menu/menu-items",
        Some(json!({
            "category_id": category["id"],
            "sku": "FRIED-RICE",
            "name": "Fried Rice",
            "price_cents": 1000,
            "cost_cents": 400,
            "preparation_time_minutes": 10
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(dish["is_active"], true);

    for (ingredient, qty, removable) in [(&rice, 1.5, false), (&egg, 1.0, true)] {
        let (status, _) = send(
            app,
            Method::POST,
            "/api/menu-ingredients",
            Some(json!({
                "menu_item_id": dish["id"],
                "ingredient_id": ingredient["id"],
                "qty_per_unit": qty,
                "is_removable": removable
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    Menu {
        outlet_id: outlet["id"].as_i64().unwrap(),
        rice_id: rice["id"].as_i64().unwrap(),
        egg_id: egg["id"].as_i64().unwrap(),
        dish_id: dish["id"].as_i64().unwrap(),
    }
}

fn order_body(menu: &Menu, quantity: i64) -> Value {
    json!({
        "table_id": 1,
        "customer_id": 1,
        "waiter_id": 1,
        "outlet_id": menu.outlet_id,
        "items": [{
            "menu_item_id": menu.dish_id,
            "quantity": quantity,
            "unit_price_cents": 1000
        }]
    })
}

async fn stock(app: &Router, ingredient_id: i64) -> f64 {
    let (_, ingredient) = send(
        app,
        Method::GET,
        &format!("/api/ingredients/{ingredient_id}"),
        None,
    )
    .await;
    ingredient["quantity"].as_f64().unwrap()
}

#[tokio::test]
async fn order_bill_and_pay() {
    let app = app().await;
    let menu = seed(&app).await;

    let (status, created) = send(&app, Method::POST, "/api/orders", Some(order_body(&menu, 2))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["order_number"].as_str().is_some());
    let order_id = created["id"].as_i64().unwrap();

    assert_eq!(stock(&app, menu.rice_id).await, 7.0);
    assert_eq!(stock(&app, menu.egg_id).await, 3.0);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/bills",
        Some(json!({"order_id": order_id, "discount_cents": 200})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["bill"]["subtotal_cents"], 2000);
    assert_eq!(created["bill"]["service_charge_cents"], 100);
    assert_eq!(created["bill"]["tax_cents"], 210);
    assert_eq!(created["bill"]["total_cents"], 2110);
    assert_eq!(created["bill"]["status"], "open");
    let bill_id = created["bill_id"].as_i64().unwrap();

    let (status, bill) = send(
        &app,
        Method::POST,
        "/api/bills/pay",
        Some(json!({"bill_id": bill_id, "payment_method": "card", "amount_cents": 1000})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bill["status"], "partial");
    assert_eq!(bill["balance_due_cents"], 1110);

    let (_, bill) = send(
        &app,
        Method::POST,
        "/api/bills/pay",
        Some(json!({"bill_id": bill_id, "method": "cash", "amount_cents": 1110})),
    )
    .await;
    assert_eq!(bill["status"], "paid");

    let (status, payments) =
        send(&app, Method::GET, &format!("/api/bills/{bill_id}/payments"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payments.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn bill_bodies_accept_amount_field_names() {
    let app = app().await;
    let menu = seed(&app).await;

    let (_, created) = send(&app, Method::POST, "/api/orders", Some(order_body(&menu, 2))).await;
    let order_id = created["id"].as_i64().unwrap();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/bills",
        Some(json!({"order_id": order_id, "discount_amount": 200})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["bill"]["discount_cents"], 200);
    assert_eq!(created["bill"]["total_cents"], 2110);
    let bill_id = created["bill_id"].as_i64().unwrap();

    let item_id = {
        let (_, order) = send(&app, Method::GET, &format!("/api/orders/{order_id}"), None).await;
        order["items"][0]["id"].as_i64().unwrap()
    };
    let (status, split) = send(
        &app,
        Method::POST,
        "/api/bills/split",
        Some(json!({
            "original_bill_id": bill_id,
            "original_order_id": order_id,
            "splits": [{"item_ids": [item_id], "discount_amount": 100}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(split["bills"][0]["discount_cents"], 100);

    let (status, bill) = send(
        &app,
        Method::POST,
        "/api/bills/pay",
        Some(json!({"bill_id": bill_id, "payment_method": "cash", "amount": 2110})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bill["status"], "paid");

    // A misspelt discount must not silently bill the full amount
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/bills",
        Some(json!({"order_id": order_id, "discount": 200})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn oversized_prices_are_rejected_before_anything_is_stored() {
    let app = app().await;
    let menu = seed(&app).await;

    let mut body = order_body(&menu, 1);
    body["items"][0]["unit_price_cents"] = json!(i64::MAX);
    let (status, body) = send(&app, Method::POST, "/api/orders", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, orders) = send(&app, Method::GET, "/api/orders", None).await;
    assert!(orders.as_array().unwrap().is_empty());
    assert_eq!(stock(&app, menu.rice_id).await, 10.0);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/bills",
        Some(json!({"order_id": 1, "discount_cents": i64::MAX})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn excluding_an_ingredient_outside_the_recipe_is_ignored() {
    let app = app().await;
    let menu = seed(&app).await;

    let mut body = order_body(&menu, 2);
    body["items"][0]["excluded_ingredient_ids"] = json!([424_242]);
    let (status, _) = send(&app, Method::POST, "/api/orders", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(stock(&app, menu.rice_id).await, 7.0);
    assert_eq!(stock(&app, menu.egg_id).await, 3.0);

    // Rice is a fixed part of the dish
    let mut body = order_body(&menu, 1);
    body["items"][0]["excluded_ingredient_ids"] = json!([menu.rice_id]);
    let (status, _) = send(&app, Method::POST, "/api/orders", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn insufficient_stock_is_422_and_changes_nothing() {
    let app = app().await;
    let menu = seed(&app).await;

    let (status, body) = send(&app, Method::POST, "/api/orders", Some(order_body(&menu, 7))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");
    assert!(body["message"].as_str().unwrap().contains("Rice"));

    assert_eq!(stock(&app, menu.rice_id).await, 10.0);
    let (_, orders) = send(&app, Method::GET, "/api/orders", None).await;
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn split_conflicts_are_409() {
    let app = app().await;
    let menu = seed(&app).await;

    let (_, created) = send(&app, Method::POST, "/api/orders", Some(order_body(&menu, 1))).await;
    let order_id = created["id"].as_i64().unwrap();
    let item_id = created["order"]["items"][0]["id"].as_i64().unwrap();

    let (_, bill) = send(
        &app,
        Method::POST,
        "/api/bills",
        Some(json!({"order_id": order_id})),
    )
    .await;
    let bill_id = bill["bill_id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/bills/split",
        Some(json!({
            "original_bill_id": bill_id,
            "original_order_id": order_id,
            "splits": [{"item_ids": [item_id]}, {"item_ids": [item_id]}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/bills/split",
        Some(json!({
            "original_bill_id": bill_id,
            "original_order_id": order_id + 100,
            "splits": [{"item_ids": [item_id]}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, split) = send(
        &app,
        Method::POST,
        "/api/bills/split",
        Some(json!({
            "original_bill_id": bill_id,
            "original_order_id": order_id,
            "splits": [{"item_ids": [item_id], "discount_cents": 50}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(split["bill_ids"].as_array().unwrap().len(), 1);
    assert_eq!(split["bills"][0]["parent_bill_id"], bill_id);
}

#[tokio::test]
async fn void_and_restock_follows_config() {
    let app = app_with(AppConfig {
        restock_on_void: true,
        ..Default::default()
    })
    .await;
    let menu = seed(&app).await;

    let (_, created) = send(&app, Method::POST, "/api/orders", Some(order_body(&menu, 2))).await;
    let order_id = created["id"].as_i64().unwrap();
    assert_eq!(stock(&app, menu.rice_id).await, 7.0);

    let (status, order) = send(&app, Method::DELETE, &format!("/api/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "void");
    assert_eq!(stock(&app, menu.rice_id).await, 10.0);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_STATE");

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/orders/{order_id}/add"),
        Some(json!({"menu_item_id": menu.dish_id, "quantity": 1, "unit_price_cents": 1000})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn table_transfer_moves_the_order() {
    let app = app().await;
    let menu = seed(&app).await;

    let (_, created) = send(&app, Method::POST, "/api/orders", Some(order_body(&menu, 1))).await;
    let order_id = created["id"].as_i64().unwrap();

    let (status, transfer) = send(
        &app,
        Method::POST,
        "/api/table-transfer",
        Some(json!({
            "order_id": order_id,
            "from_table_id": 1,
            "to_table_id": 8,
            "transferred_by": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let transfer_id = transfer["id"].as_i64().unwrap();

    let (_, order) = send(&app, Method::GET, &format!("/api/orders/{order_id}"), None).await;
    assert_eq!(order["table_id"], 8);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/table-transfer",
        Some(json!({
            "order_id": 999,
            "from_table_id": 1,
            "to_table_id": 8,
            "transferred_by": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (_, all) = send(&app, Method::GET, "/api/table-transfer", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/table-transfer/{transfer_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn reservations_reject_double_booking() {
    let app = app().await;
    let booking = json!({
        "customer_id": 1,
        "table_id": 4,
        "reservation_time": "2026-03-14T19:00:00Z",
        "pax": 2
    });

    let (status, _) = send(&app, Method::POST, "/api/reservations", Some(booking.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/api/reservations", Some(booking)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, list) = send(&app, Method::GET, "/api/reservations?sort_by=status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::GET, "/api/reservations?sort_by=size", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn catalog_rules_over_http() {
    let app = app().await;
    let menu = seed(&app).await;

    // Costs more than it sells for: starts inactive
    let (_, category) = send(&app, Method::GET, "/api/menu/category", None).await;
    let (status, loss_leader) = send(
        &app,
        Method::POST,
        "/api/menu/menu-items",
        Some(json!({
            "category_id": category[0]["id"],
            "sku": "LOBSTER",
            "name": "Lobster",
            "price_cents": 500,
            "cost_cents": 900,
            "preparation_time_minutes": 25
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(loss_leader["is_active"], false);

    let (_, active) = send(&app, Method::GET, "/api/menu/menu-items/active", None).await;
    assert_eq!(active.as_array().unwrap().len(), 1);

    let (_, found) = send(&app, Method::GET, "/api/menu/menu-items/search?q=fried", None).await;
    assert_eq!(found[0]["id"], menu.dish_id);

    let (_, detail) = send(
        &app,
        Method::GET,
        &format!("/api/menu/menu-items/{}/detail", menu.dish_id),
        None,
    )
    .await;
    assert_eq!(detail["ingredients"].as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/menu/menu-items",
        Some(json!({
            "category_id": category[0]["id"],
            "sku": "FRIED-RICE",
            "name": "Fried Rice Again",
            "price_cents": 1000,
            "cost_cents": 300,
            "preparation_time_minutes": 10
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, ingredient) = send(
        &app,
        Method::POST,
        &format!("/api/ingredients/{}/adjust", menu.egg_id),
        Some(json!({"delta": -2.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ingredient["quantity"], 3.0);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/ingredients/{}/adjust", menu.egg_id),
        Some(json!({"delta": -50.0})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn menu_items_carry_tags_and_requested_state() {
    let app = app().await;
    let menu = seed(&app).await;
    let (_, category) = send(&app, Method::GET, "/api/menu/category", None).await;

    let (status, sambal) = send(
        &app,
        Method::POST,
        "/api/menu/menu-items",
        Some(json!({
            "category_id": category[0]["id"],
            "sku": "SAMBAL",
            "name": "Sambal Matah",
            "price_cents": 300,
            "cost_cents": 100,
            "tags": ["spicy", "vegan"],
            "is_active": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sambal["is_active"], false);
    assert_eq!(sambal["tags"], json!(["spicy", "vegan"]));

    let (_, active) = send(&app, Method::GET, "/api/menu/menu-items/active", None).await;
    assert_eq!(active.as_array().unwrap().len(), 1);
    assert_eq!(active[0]["id"], menu.dish_id);
    assert_eq!(active[0]["tags"], json!([]));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/menu/menu-items",
        Some(json!({
            "category_id": category[0]["id"],
            "sku": "BLAND",
            "name": "Bland",
            "price_cents": 300,
            "tags": ["mild", "MILD"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn floor_and_guest_records_over_http() {
    let app = app().await;
    let menu = seed(&app).await;

    // Tables
    let (status, table) = send(
        &app,
        Method::POST,
        "/api/tables",
        Some(json!({"outlet_id": menu.outlet_id, "table_number": "A4", "capacity": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(table["status"], "available");
    let table_id = table["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/tables",
        Some(json!({"outlet_id": menu.outlet_id, "table_number": "A4", "capacity": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, table) = send(
        &app,
        Method::PUT,
        &format!("/api/tables/{table_id}"),
        Some(json!({"status": "occupied"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(table["status"], "occupied");

    let (_, free) = send(
        &app,
        Method::GET,
        &format!("/api/tables?outlet_id={}&status=available", menu.outlet_id),
        None,
    )
    .await;
    assert!(free.as_array().unwrap().is_empty());

    let (status, _) = send(&app, Method::DELETE, &format!("/api/tables/{table_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &format!("/api/tables/{table_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Staff
    let (status, staff) = send(
        &app,
        Method::POST,
        "/api/staff",
        Some(json!({"name": "Budi", "role": "waiter", "pin_code": "0420"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(staff.get("pin_code").is_none());
    let staff_id = staff["id"].as_i64().unwrap();

    let (_, check) = send(
        &app,
        Method::POST,
        &format!("/api/staff/{staff_id}/verify-pin"),
        Some(json!({"pin_code": "0420"})),
    )
    .await;
    assert_eq!(check["valid"], true);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/staff/{staff_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, all_staff) = send(&app, Method::GET, "/api/staff", None).await;
    assert!(all_staff.as_array().unwrap().is_empty());

    // Customers and visits
    let (status, customer) = send(
        &app,
        Method::POST,
        "/api/customers",
        Some(json!({"name": "Ayu", "type": "hotel_guest", "hotel_guest_id": "G-88"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(customer["customer_type"], "hotel_guest");
    assert_eq!(customer["visit_count"], 0);
    let customer_id = customer["id"].as_i64().unwrap();

    let (status, visit) = send(
        &app,
        Method::POST,
        "/api/visits",
        Some(json!({
            "customer_id": customer_id,
            "outlet_id": menu.outlet_id,
            "visit_type": "room_service",
            "room_number": "1204",
            "total_spent_cents": 4500,
            "pax": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let visit_id = visit["id"].as_i64().unwrap();

    let (_, customer) = send(&app, Method::GET, &format!("/api/customers/{customer_id}"), None).await;
    assert_eq!(customer["visit_count"], 1);
    assert!(customer["last_visit"].as_str().is_some());

    let (_, history) = send(
        &app,
        Method::GET,
        &format!("/api/customers/{customer_id}/visits"),
        None,
    )
    .await;
    assert_eq!(history[0]["id"], visit_id);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/visits/{visit_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, customer) = send(&app, Method::GET, &format!("/api/customers/{customer_id}"), None).await;
    assert_eq!(customer["visit_count"], 0);
    assert!(customer["last_visit"].is_null());

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/customers/{customer_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/visits",
        Some(json!({"customer_id": customer_id, "outlet_id": menu.outlet_id, "pax": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_and_bad_ids() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);

    let (status, body) = send(&app, Method::GET, "/api/bills/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Bill not found: 42");

    let (status, _) = send(&app, Method::GET, "/api/orders/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
