//! Storefront REST client implementation.
//!
//! Uses `reqwest` with JSON bodies. Nothing is cached: the catalog is held by
//! the controller for the session and the cart is mutable server state.

mod conversions;
pub(crate) mod wire;

use std::sync::Arc;

use pantry_core::{CartEntryId, ProductId, Quantity};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::api::types::{CartSnapshot, OrderReceipt, OrderRequest, Product};
use crate::api::{ApiError, StoreApi};
use crate::config::ApiConfig;

use conversions::{convert_cart, convert_order_receipt, convert_product};
use wire::{
    CartItemBody, CartResponse, Envelope, MessageResponse, MessageText, OrderBody, OrderResponse,
    ProductsResponse, UserBody,
};

// =============================================================================
// StoreClient
// =============================================================================

/// Client for the storefront REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

struct StoreClientInner {
    client: reqwest::Client,
    api_root: Url,
}

impl StoreClient {
    /// Create a new client with default HTTP settings.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            inner: Arc::new(StoreClientInner {
                client: reqwest::Client::new(),
                api_root: config.api_root().clone(),
            }),
        }
    }

    /// Absolute URL for an endpoint below the API root.
    ///
    /// Each segment is percent-encoded as a whole, so an ID can never
    /// introduce a path separator, a query or a fragment.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(ApiError::InvalidPathSegment((*segment).to_string()));
        }

        let mut url = self.inner.api_root.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidPathSegment(self.inner.api_root.to_string()))?
            .extend(segments);
        Ok(url)
    }

    /// Send a request and decode a successful body.
    ///
    /// A non-2xx status or a body carrying `"success": false` becomes
    /// [`ApiError::Rejected`] with the server's message.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        let body: serde_json::Value = match serde_json::from_str(&response_text) {
            Ok(value) => value,
            Err(e) if status.is_success() => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse storefront API response"
                );
                return Err(ApiError::Parse(e));
            }
            // Error pages (gateway HTML etc.) carry no message worth parsing
            Err(_) => serde_json::Value::Null,
        };

        let declined = body.get("success").and_then(serde_json::Value::as_bool) == Some(false);
        if !status.is_success() || declined {
            let message = rejection_message(&body, status);
            debug!(status = %status, message = %message, "Storefront API rejected request");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_value(body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Storefront API response has an unexpected shape"
            );
            ApiError::Parse(e)
        })
    }

    /// Send a mutating request and return the server's message.
    async fn execute_message(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response: MessageResponse = self.execute(request).await?;
        Ok(response
            .message
            .map(MessageText::into_text)
            .unwrap_or_default())
    }
}

/// Extract the human-readable message from an error body.
fn rejection_message(body: &serde_json::Value, status: StatusCode) -> String {
    body.get("message")
        .cloned()
        .and_then(|value| serde_json::from_value::<MessageText>(value).ok())
        .map(MessageText::into_text)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string)
        })
}

impl StoreApi for StoreClient {
    // =========================================================================
    // Catalog
    // =========================================================================

    #[instrument(skip(self))]
    async fn products(&self) -> Result<Vec<Product>, ApiError> {
        let request = self.inner.client.get(self.url(&["products", "all"])?);
        let response: ProductsResponse = self.execute(request).await?;
        let products: Vec<Product> = response.products.into_iter().map(convert_product).collect();
        debug!(count = products.len(), "Fetched catalog");
        Ok(products)
    }

    // =========================================================================
    // Cart (never cached - mutable server state)
    // =========================================================================

    #[instrument(skip(self))]
    async fn cart(&self) -> Result<CartSnapshot, ApiError> {
        let request = self.inner.client.get(self.url(&["cart"])?);
        let response: CartResponse = self.execute(request).await?;
        Ok(convert_cart(response.data))
    }

    #[instrument(skip_all, fields(product_id = %product_id, qty = %qty))]
    async fn add_to_cart(&self, product_id: &ProductId, qty: Quantity) -> Result<String, ApiError> {
        let body = Envelope {
            data: CartItemBody {
                product_id: product_id.as_str(),
                qty: qty.get(),
            },
        };
        let request = self.inner.client.post(self.url(&["cart"])?).json(&body);
        self.execute_message(request).await
    }

    #[instrument(skip_all, fields(entry_id = %entry_id, qty = %qty))]
    async fn update_cart_entry(
        &self,
        entry_id: &CartEntryId,
        product_id: &ProductId,
        qty: Quantity,
    ) -> Result<String, ApiError> {
        let body = Envelope {
            data: CartItemBody {
                product_id: product_id.as_str(),
                qty: qty.get(),
            },
        };
        let request = self
            .inner
            .client
            .put(self.url(&["cart", entry_id.as_str()])?)
            .json(&body);
        self.execute_message(request).await
    }

    #[instrument(skip_all, fields(entry_id = %entry_id))]
    async fn remove_cart_entry(&self, entry_id: &CartEntryId) -> Result<String, ApiError> {
        let request = self
            .inner
            .client
            .delete(self.url(&["cart", entry_id.as_str()])?);
        self.execute_message(request).await
    }

    #[instrument(skip(self))]
    async fn clear_cart(&self) -> Result<String, ApiError> {
        let request = self.inner.client.delete(self.url(&["carts"])?);
        self.execute_message(request).await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    #[instrument(skip(self, order))]
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderReceipt, ApiError> {
        let body = Envelope {
            data: OrderBody {
                user: UserBody {
                    email: order.user.email.as_str(),
                    name: &order.user.name,
                    tel: order.user.tel.as_str(),
                    address: &order.user.address,
                },
                message: &order.message,
            },
        };
        let request = self.inner.client.post(self.url(&["order"])?).json(&body);
        let response: OrderResponse = self.execute(request).await?;
        Ok(convert_order_receipt(response))
    }
}
