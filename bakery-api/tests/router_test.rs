/// Router tests that need no database
///
/// The application is built over a pool that never connects, so only
/// routes that stay away from the database are exercised here:
/// - menu and customize views
/// - the session cart
/// - order submission with an empty cart
/// - the admin guard

mod common;

use axum::http::{Method, StatusCode};
use common::{lazy_app, Client};
use serde_json::json;

#[tokio::test]
async fn test_menu_lists_all_categories() {
    let mut client = Client::new(lazy_app());

    let response = client.get("/menu").await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    let categories = body["menu_categories"].as_array().unwrap();
    assert_eq!(categories.len(), 6);
    assert_eq!(categories[0]["name"], "Regular Cakes");
    assert_eq!(categories[0]["menu_items"][0]["name"], "Chocolate Cake");
    assert_eq!(categories[0]["menu_items"][0]["price"], 600);
}

#[tokio::test]
async fn test_customize_separates_addons() {
    let mut client = Client::new(lazy_app());

    let body = client.get("/customize").await.json();
    let addons: Vec<&str> = body["addons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();

    assert_eq!(addons, vec!["Photo Print", "Doll Cake", "Tall Cake", "Foundant"]);
    assert_eq!(body["cakes"].as_array().unwrap().len(), 26);
}

#[tokio::test]
async fn test_home_reports_store_name() {
    let mut client = Client::new(lazy_app());

    let body = client.get("/").await.json();
    assert_eq!(body["store_name"], "Test Bakery");
    assert_eq!(body["item_count"], 30);
    assert_eq!(body["addon_count"], 4);
}

#[tokio::test]
async fn test_cart_flow() {
    let mut client = Client::new(lazy_app());

    let empty = client.get("/cart").await.json();
    assert_eq!(empty["total"], 0);
    assert!(empty["cart_items"].as_array().unwrap().is_empty());

    // Menu price is used for item_id adds
    let response = client
        .post_json("/cart/add", json!({ "item_id": 1, "price": 1 }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "success": true, "message": "Item added to cart" }));
    assert!(client.has_session());

    client
        .post_json("/cart/add", json!({ "name": "Cup Cakes", "price": 40, "quantity": 2 }))
        .await;

    let cart = client.get("/cart").await.json();
    assert_eq!(cart["total"], 680);
    assert_eq!(cart["cart_items"][0]["name"], "Chocolate Cake");
    assert_eq!(cart["cart_items"][1]["subtotal"], 80);

    let response = client
        .post_json("/cart/update/1", json!({ "change": -100 }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(client.get("/cart").await.json()["cart_items"][1]["quantity"], 1);

    let response = client.post_empty("/cart/remove/0").await;
    assert_eq!(response.json()["message"], "Item removed from cart");

    let cart = client.get("/cart").await.json();
    assert_eq!(cart["cart_items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["total"], 40);

    client.post_empty("/cart/clear").await;
    assert_eq!(client.get("/cart").await.json()["total"], 0);
}

#[tokio::test]
async fn test_cart_rejects_bad_index() {
    let mut client = Client::new(lazy_app());
    client
        .post_json("/cart/add", json!({ "name": "Cake Pops", "price": 50 }))
        .await;

    let response = client.post_empty("/cart/remove/5").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let body = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid item index");

    let response = client.post_json("/cart/update/3", json!({ "change": 1 })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    assert_eq!(client.get("/cart").await.json()["cart_items"][0]["quantity"], 1);
}

#[tokio::test]
async fn test_cart_add_requires_name_and_price() {
    let mut client = Client::new(lazy_app());

    let response = client.post_json("/cart/add", json!({ "name": "Mystery" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "Invalid data");

    let response = client.post_json("/cart/add", json!({ "item_id": 999 })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cart_rejects_out_of_range_values() {
    let mut client = Client::new(lazy_app());

    let response = client
        .post_json("/cart/add", json!({ "name": "Cake", "price": i64::MAX, "quantity": 2 }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["success"], false);

    let cart = client.get("/cart").await;
    assert_eq!(cart.status, StatusCode::OK);
    assert_eq!(cart.json()["total"], 0);

    client
        .post_json("/cart/add", json!({ "name": "Cake Pops", "price": 50 }))
        .await;
    let response = client
        .post_json("/cart/update/0", json!({ "change": i64::MAX }))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let cart = client.get("/cart").await.json();
    assert_eq!(cart["cart_items"][0]["quantity"], 10_000);
    assert_eq!(cart["total"], 500_000);
}

#[tokio::test]
async fn test_carts_are_per_session() {
    let app = lazy_app();
    let mut first = Client::new(app.clone());
    let mut second = Client::new(app);

    first.post_json("/cart/add", json!({ "item_id": 6 })).await;

    assert_eq!(first.get("/cart").await.json()["total"], 800);
    assert_eq!(second.get("/cart").await.json()["total"], 0);
}

#[tokio::test]
async fn test_order_with_empty_cart_rejected() {
    let mut client = Client::new(lazy_app());

    let response = client
        .post_json(
            "/order/create",
            json!({
                "name": "Asha",
                "email": "asha@example.com",
                "phone": "9876543210",
                "delivery_type": "pickup",
                "delivery_date": "2030-01-10"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "Cart is empty");
}

#[tokio::test]
async fn test_admin_pages_redirect_to_login() {
    let mut client = Client::new(lazy_app());

    for uri in ["/admin", "/admin/gallery", "/admin/order/1", "/logout"] {
        let response = client.get(uri).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(response.location.as_deref(), Some("/login"), "{}", uri);
    }
}

#[tokio::test]
async fn test_admin_actions_require_login() {
    let mut client = Client::new(lazy_app());

    let response = client
        .post_json("/admin/update_status", json!({ "order_id": 1, "status": "Confirmed" }))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["message"], "Admin login required");

    let response = client
        .send_json(Method::PUT, "/api/order/1/status", json!({ "status": "Confirmed" }))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = client.post_empty("/admin/gallery/1/delete").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_security_headers_applied() {
    let mut client = Client::new(lazy_app());

    let response = client.get("/menu").await;
    assert_eq!(response.headers["x-content-type-options"], "nosniff");
    assert_eq!(response.headers["x-frame-options"], "DENY");
    assert!(response.headers.get("strict-transport-security").is_none());
}

#[tokio::test]
async fn test_login_page_reports_anonymous() {
    let mut client = Client::new(lazy_app());

    let body = client.get("/login").await.json();
    assert_eq!(body["authenticated"], false);
    assert!(body["flash"].as_array().unwrap().is_empty());
}
