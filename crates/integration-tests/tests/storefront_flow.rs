//! End-to-end buyer flow against a live Orchard API server.
//!
//! These tests require:
//! - A running Orchard API server (`ORCHARD_API_URL`, default
//!   `http://localhost:5000/api`)
//! - At least one product with stock in the catalog
//!
//! Run with: `cargo test -p orchard-integration-tests -- --ignored`

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use rust_decimal::Decimal;

use orchard_client::api::{NewOrder, ProductQuery};
use orchard_client::error::ApiError;
use orchard_core::{OrderStatus, ShippingAddress};
use orchard_integration_tests::{signup_buyer, test_client, unique_username};

fn test_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Integration Test".to_owned(),
        address: "1 Test Lane".to_owned(),
        city: "Testville".to_owned(),
        postal_code: "00000".to_owned(),
        country: "PK".to_owned(),
        mobile: "03000000000".to_owned(),
    }
}

#[tokio::test]
#[ignore = "Requires a running Orchard API server"]
async fn test_products_are_browsable_anonymously() {
    let client = test_client();

    let products = client.products(&ProductQuery::default()).await.unwrap();
    assert!(!products.is_empty(), "catalog should be seeded");

    let first = client.product(&products[0].id).await.unwrap();
    assert_eq!(first.id, products[0].id);

    // The `all` sentinel must behave exactly like no filter.
    let unfiltered = client
        .products(&ProductQuery {
            category: Some("all".to_owned()),
            ..ProductQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(unfiltered.len(), products.len());
}

#[tokio::test]
#[ignore = "Requires a running Orchard API server"]
async fn test_cart_requires_authentication() {
    let client = test_client();
    let products = client.products(&ProductQuery::default()).await.unwrap();

    let error = client
        .add_to_cart(&products[0].id, 1)
        .await
        .expect_err("anonymous add must be rejected");
    match error {
        ApiError::Api { status, .. } => assert_eq!(status, StatusCode::UNAUTHORIZED),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
#[ignore = "Requires a running Orchard API server"]
async fn test_signup_cart_and_checkout() {
    let client = test_client();
    let auth = signup_buyer(&client).await;
    assert!(!auth.user.is_admin());

    let products = client.products(&ProductQuery::default()).await.unwrap();
    let product = products
        .iter()
        .find(|p| p.stock >= 2)
        .expect("need a product with stock");

    // Add, then bump the quantity; every response is the whole cart.
    let cart = client.add_to_cart(&product.id, 1).await.unwrap();
    assert_eq!(cart.item_count(), 1);

    let cart = client.update_cart_item(&product.id, 2).await.unwrap();
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.subtotal(), product.price * Decimal::from(2));

    // Check out; the order must snapshot the line and start pending.
    let order = client
        .create_order(&NewOrder {
            shipping_address: test_address(),
            payment_method: Some("cod".to_owned()),
        })
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].name, product.name);

    // The order shows up in history and is cancellable while pending.
    let history = client.my_orders().await.unwrap();
    assert!(history.iter().any(|o| o.id == order.id));

    let cancelled = client.cancel_order(&order.id).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    // A cancelled order cannot be cancelled again.
    assert!(client.cancel_order(&order.id).await.is_err());
}

#[tokio::test]
#[ignore = "Requires a running Orchard API server"]
async fn test_clear_cart_empties_it() {
    let client = test_client();
    signup_buyer(&client).await;

    let products = client.products(&ProductQuery::default()).await.unwrap();
    let product = products
        .iter()
        .find(|p| p.stock >= 1)
        .expect("need a product with stock");

    client.add_to_cart(&product.id, 1).await.unwrap();
    client.clear_cart().await.unwrap();

    let count = client.cart_count().await.unwrap();
    assert_eq!(count.count, 0);
}

#[tokio::test]
#[ignore = "Requires a running Orchard API server"]
async fn test_login_with_wrong_password_fails() {
    let client = test_client();
    let error = client
        .login(&unique_username("ghost"), "wrong-password")
        .await
        .expect_err("unknown account must not log in");
    assert!(matches!(error, ApiError::Api { .. }));
}
