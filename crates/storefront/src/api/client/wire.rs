//! Raw request and response bodies as the API spells them.
//!
//! Field names follow the wire (`imageUrl`, `final_total`, `orderId`). Use
//! `conversions` to turn responses into domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Requests
// =============================================================================

/// Every request body is wrapped in `{ "data": ... }`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Body of `POST /cart` and `PUT /cart/{id}`.
#[derive(Debug, Serialize)]
pub struct CartItemBody<'a> {
    pub product_id: &'a str,
    pub qty: u8,
}

/// Body of `POST /order`.
#[derive(Debug, Serialize)]
pub struct OrderBody<'a> {
    pub user: UserBody<'a>,
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UserBody<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub tel: &'a str,
    pub address: &'a str,
}

// =============================================================================
// Responses
// =============================================================================

/// `GET /products/all`.
#[derive(Debug, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<ProductData>,
}

#[derive(Debug, Deserialize)]
pub struct ProductData {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub origin_price: Option<Decimal>,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "imagesUrl", default)]
    pub images_url: Option<Vec<String>>,
    /// `1`/`0` from the admin panel, occasionally a boolean.
    #[serde(default)]
    pub is_enabled: Option<serde_json::Value>,
}

/// `GET /cart`.
#[derive(Debug, Deserialize)]
pub struct CartResponse {
    pub data: CartData,
}

#[derive(Debug, Deserialize)]
pub struct CartData {
    #[serde(default)]
    pub carts: Vec<CartEntryData>,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub final_total: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CartEntryData {
    pub id: String,
    pub product_id: String,
    pub qty: u32,
    pub product: ProductData,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub final_total: Decimal,
}

/// Mutating endpoints answer with at least a message.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<MessageText>,
}

/// `POST /order`.
#[derive(Debug, Deserialize)]
pub struct OrderResponse {
    #[serde(default)]
    pub message: Option<MessageText>,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(rename = "orderId", default)]
    pub order_id: Option<String>,
}

/// Validation failures arrive as a list of messages, everything else as one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MessageText {
    One(String),
    Many(Vec<String>),
}

impl MessageText {
    /// Join into the single line shown to the shopper.
    pub fn into_text(self) -> String {
        match self {
            Self::One(message) => message,
            Self::Many(messages) => messages.join("、"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_item_body_shape() {
        let body = Envelope {
            data: CartItemBody {
                product_id: "p1",
                qty: 3,
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "data": { "product_id": "p1", "qty": 3 } })
        );
    }

    #[test]
    fn test_message_list_is_joined() {
        let response: MessageResponse =
            serde_json::from_str(r#"{"success":false,"message":["Email 欄位為必填","姓名 欄位為必填"]}"#)
                .unwrap();
        assert_eq!(
            response.message.unwrap().into_text(),
            "Email 欄位為必填、姓名 欄位為必填"
        );
    }

    #[test]
    fn test_cart_totals_accept_fractions() {
        let response: CartResponse = serde_json::from_str(
            r#"{"success":true,"data":{"carts":[],"total":1200,"final_total":1080.5}}"#,
        )
        .unwrap();
        assert_eq!(response.data.total, Decimal::from(1200));
        assert_eq!(response.data.final_total, Decimal::new(10805, 1));
    }
}
