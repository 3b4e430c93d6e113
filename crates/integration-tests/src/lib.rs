//! Integration tests for the Pantry storefront.
//!
//! The tests drive a real [`StoreClient`] through the [`Storefront`]
//! controller against a `mockito` server that speaks the hosted cart API.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pantry-integration-tests
//! ```
//!
//! This module holds the response builders and wiring shared by the test
//! files under `tests/`.

use pantry_storefront::{ApiConfig, ChannelNotifier, Notification, StoreClient, Storefront};
use serde_json::{Value, json};
use tokio::sync::mpsc::UnboundedReceiver;

/// Shop path segment used by every test.
pub const API_PATH: &str = "pantry";

/// Controller wired the way a front end would, with notifications on a channel.
pub type TestStore = Storefront<StoreClient, ChannelNotifier>;

/// Full request path for an endpoint, e.g. `path("/cart")`.
#[must_use]
pub fn path(endpoint: &str) -> String {
    format!("/v2/api/{API_PATH}{endpoint}")
}

/// Build a controller talking to `server`.
///
/// # Panics
///
/// Panics if the mock server URL is not a valid base URL.
#[must_use]
pub fn storefront(server: &mockito::ServerGuard) -> (TestStore, UnboundedReceiver<Notification>) {
    let config = ApiConfig::new(&server.url(), API_PATH).expect("mock server URL is valid");
    let (notifier, notifications) = ChannelNotifier::new();
    (Storefront::new(StoreClient::new(&config), notifier), notifications)
}

/// Everything notified so far.
pub fn drain(notifications: &mut UnboundedReceiver<Notification>) -> Vec<Notification> {
    let mut seen = Vec::new();
    while let Ok(notification) = notifications.try_recv() {
        seen.push(notification);
    }
    seen
}

/// A product as `GET /products/all` returns it.
#[must_use]
pub fn product_json(id: &str, title: &str, price: i64) -> Value {
    json!({
        "id": id,
        "title": title,
        "category": "茶葉",
        "origin_price": price,
        "price": price,
        "unit": "罐",
        "content": "150公克",
        "description": "",
        "is_enabled": 1,
        "imageUrl": format!("https://img.example/{id}.jpg"),
        "imagesUrl": [format!("https://img.example/{id}-2.jpg"), ""],
    })
}

/// Body of `GET /products/all`.
#[must_use]
pub fn products_body(products: &[Value]) -> String {
    json!({ "success": true, "products": products }).to_string()
}

/// One cart line with server-computed totals.
#[must_use]
pub fn cart_entry_json(id: &str, product_id: &str, title: &str, price: i64, qty: u32) -> Value {
    let total = price * i64::from(qty);
    json!({
        "id": id,
        "product_id": product_id,
        "qty": qty,
        "product": product_json(product_id, title, price),
        "total": total,
        "final_total": total,
    })
}

/// Body of `GET /cart`.
#[must_use]
pub fn cart_body(entries: &[Value]) -> String {
    let total: i64 = entries
        .iter()
        .filter_map(|entry| entry.get("total").and_then(Value::as_i64))
        .sum();
    json!({
        "success": true,
        "data": { "carts": entries, "total": total, "final_total": total },
    })
    .to_string()
}

/// Body of a successful mutation.
#[must_use]
pub fn message_body(message: &str) -> String {
    json!({ "success": true, "message": message }).to_string()
}

/// Body of a refused mutation.
#[must_use]
pub fn failure_body(message: impl Into<Value>) -> String {
    json!({ "success": false, "message": message.into() }).to_string()
}
