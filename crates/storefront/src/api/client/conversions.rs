//! Wire-to-domain conversion functions.

use pantry_core::{CartEntryId, OrderId, Price, ProductId};
use tracing::warn;

use crate::api::types::{CartEntry, CartSnapshot, OrderReceipt, Product};

use super::wire::{CartData, CartEntryData, OrderResponse, ProductData};

pub fn convert_product(product: ProductData) -> Product {
    Product {
        id: ProductId::new(product.id),
        title: product.title,
        category: product.category,
        price: Price::twd(product.price),
        origin_price: product.origin_price.map(Price::twd),
        unit: product.unit.filter(|unit| !unit.is_empty()),
        content: product.content,
        description: product.description,
        image_url: product.image_url.unwrap_or_default(),
        images_url: product
            .images_url
            .unwrap_or_default()
            .into_iter()
            .filter(|url| !url.is_empty())
            .collect(),
        is_enabled: product.is_enabled.as_ref().is_none_or(is_truthy),
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(flag) => *flag,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::Null => false,
        other => {
            warn!(value = %other, "Unexpected is_enabled value, treating as enabled");
            true
        }
    }
}

pub fn convert_cart(cart: CartData) -> CartSnapshot {
    CartSnapshot {
        entries: cart.carts.into_iter().map(convert_cart_entry).collect(),
        total: Price::twd(cart.total),
        final_total: Price::twd(cart.final_total),
    }
}

fn convert_cart_entry(entry: CartEntryData) -> CartEntry {
    CartEntry {
        id: CartEntryId::new(entry.id),
        product_id: ProductId::new(entry.product_id),
        qty: entry.qty,
        product: convert_product(entry.product),
        total: Price::twd(entry.total),
        final_total: Price::twd(entry.final_total),
    }
}

pub fn convert_order_receipt(response: OrderResponse) -> OrderReceipt {
    OrderReceipt {
        message: response
            .message
            .map(super::wire::MessageText::into_text)
            .unwrap_or_default(),
        order_id: response.order_id.map(OrderId::new),
        total: response.total.map(Price::twd),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::client::wire::{CartResponse, ProductsResponse};

    const PRODUCTS_JSON: &str = r#"{
        "success": true,
        "products": [{
            "id": "-L9tH8jxVb2Ka_DYPwng",
            "title": "阿里山烏龍",
            "category": "烏龍茶",
            "origin_price": 600,
            "price": 480,
            "unit": "罐",
            "content": "150公克",
            "description": "高山茶",
            "is_enabled": 1,
            "imageUrl": "https://img.example/oolong.jpg",
            "imagesUrl": ["https://img.example/oolong-2.jpg", ""],
            "num": 1
        }]
    }"#;

    #[test]
    fn test_convert_product() {
        let response: ProductsResponse = serde_json::from_str(PRODUCTS_JSON).unwrap();
        let product = convert_product(response.products.into_iter().next().unwrap());

        assert_eq!(product.id.as_str(), "-L9tH8jxVb2Ka_DYPwng");
        assert_eq!(product.price, Price::from(480));
        assert_eq!(product.origin_price, Some(Price::from(600)));
        assert_eq!(product.unit.as_deref(), Some("罐"));
        assert_eq!(product.images_url, ["https://img.example/oolong-2.jpg"]);
        assert!(product.is_enabled);
    }

    #[test]
    fn test_convert_product_with_missing_optionals() {
        let data: ProductData =
            serde_json::from_str(r#"{"id":"p2","title":"綠茶","price":300,"is_enabled":0}"#)
                .unwrap();
        let product = convert_product(data);
        assert!(product.image_url.is_empty());
        assert!(product.images_url.is_empty());
        assert!(product.origin_price.is_none());
        assert!(!product.is_enabled);
    }

    #[test]
    fn test_convert_cart() {
        let response: CartResponse = serde_json::from_str(
            r#"{
                "success": true,
                "data": {
                    "carts": [{
                        "id": "c1",
                        "product_id": "p1",
                        "qty": 3,
                        "total": 1440,
                        "final_total": 1440,
                        "product": {"id": "p1", "title": "阿里山烏龍", "price": 480}
                    }],
                    "total": 1440,
                    "final_total": 1440
                }
            }"#,
        )
        .unwrap();
        let cart = convert_cart(response.data);

        assert_eq!(cart.entries.len(), 1);
        assert_eq!(cart.entries[0].qty, 3);
        assert_eq!(cart.entries[0].product.title, "阿里山烏龍");
        assert_eq!(cart.final_total, Price::from(1440));
    }
}
