//! Storefront REST API: the `StoreApi` seam and its HTTP client.
//!
//! # Architecture
//!
//! - The backend is the source of truth - NO local cart math, every mutation
//!   is followed by a fresh `GET /cart`
//! - [`StoreApi`] is the boundary the controller talks to; [`StoreClient`]
//!   implements it with `reqwest`
//! - No caching, no retries, no timeouts beyond the HTTP client defaults
//!
//! # Endpoints
//!
//! All paths are relative to `{base_url}/v2/api/{api_path}`:
//!
//! | Method | Path            | Purpose                     |
//! |--------|-----------------|-----------------------------|
//! | GET    | `/products/all` | Full catalog                |
//! | GET    | `/cart`         | Cart snapshot               |
//! | POST   | `/cart`         | Add an entry                |
//! | PUT    | `/cart/{id}`    | Change an entry's quantity  |
//! | DELETE | `/cart/{id}`    | Remove one entry            |
//! | DELETE | `/carts`        | Empty the cart              |
//! | POST   | `/order`        | Place an order              |

mod client;
pub mod types;

use std::future::Future;

use pantry_core::{CartEntryId, ProductId, Quantity};
use thiserror::Error;

pub use client::StoreClient;
pub use types::*;

/// Errors that can occur when talking to the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The server answered with a non-success status or `success: false`.
    #[error("Rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server-supplied message, shown to the shopper verbatim.
        message: String,
    },

    /// An ID that cannot stand as a single URL path segment.
    #[error("Not a valid path segment: {0:?}")]
    InvalidPathSegment(String),
}

impl ApiError {
    /// The server-supplied message, if the server answered at all.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message),
            Self::Http(_) | Self::Parse(_) | Self::InvalidPathSegment(_) => None,
        }
    }
}

/// Operations the storefront backend offers.
///
/// Mutating calls return the server's human-readable message. None of them
/// return cart state; callers re-fetch with [`StoreApi::cart`].
pub trait StoreApi: Send + Sync {
    /// Fetch the full product catalog.
    fn products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// Fetch the authoritative cart snapshot.
    fn cart(&self) -> impl Future<Output = Result<CartSnapshot, ApiError>> + Send;

    /// Add `qty` units of a product to the cart.
    fn add_to_cart(
        &self,
        product_id: &ProductId,
        qty: Quantity,
    ) -> impl Future<Output = Result<String, ApiError>> + Send;

    /// Set the quantity of an existing entry.
    fn update_cart_entry(
        &self,
        entry_id: &CartEntryId,
        product_id: &ProductId,
        qty: Quantity,
    ) -> impl Future<Output = Result<String, ApiError>> + Send;

    /// Remove one entry.
    fn remove_cart_entry(
        &self,
        entry_id: &CartEntryId,
    ) -> impl Future<Output = Result<String, ApiError>> + Send;

    /// Remove every entry.
    fn clear_cart(&self) -> impl Future<Output = Result<String, ApiError>> + Send;

    /// Place an order for the current cart.
    fn submit_order(
        &self,
        order: &OrderRequest,
    ) -> impl Future<Output = Result<OrderReceipt, ApiError>> + Send;
}
