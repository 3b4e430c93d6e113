//! Domain types for the storefront REST API.
//!
//! These types provide a clean, ergonomic API separate from the raw wire
//! structs in `client::wire`.

use pantry_core::{CartEntryId, Email, OrderId, Phone, Price, ProductId, Quantity};
use serde::Serialize;

// =============================================================================
// Product Types
// =============================================================================

/// A catalog product.
///
/// Immutable once fetched; the whole catalog is replaced on re-fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub category: String,
    /// Selling price.
    pub price: Price,
    /// List price before discount, when the shop sets one.
    pub origin_price: Option<Price>,
    /// Sales unit (e.g. "罐").
    pub unit: Option<String>,
    /// Package size descriptor (e.g. "120公克").
    pub content: String,
    pub description: String,
    /// Primary image URL.
    pub image_url: String,
    /// Secondary image URLs, in display order.
    pub images_url: Vec<String>,
    pub is_enabled: bool,
}

impl Product {
    /// Primary image followed by the secondary images.
    pub fn gallery(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.image_url.as_str())
            .chain(self.images_url.iter().map(String::as_str))
            .filter(|url| !url.is_empty())
    }

    /// Whether `url` is one of this product's images.
    #[must_use]
    pub fn has_image(&self, url: &str) -> bool {
        self.gallery().any(|candidate| candidate == url)
    }

    /// Whether the list price is higher than the selling price.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.origin_price
            .is_some_and(|origin| origin.amount > self.price.amount)
    }
}

// =============================================================================
// Cart Types
// =============================================================================

/// One line of the server-side cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartEntry {
    pub id: CartEntryId,
    pub product_id: ProductId,
    /// Quantity as the server reports it. Repeated adds accumulate, so this
    /// may exceed [`Quantity::MAX`].
    pub qty: u32,
    pub product: Product,
    /// Line total before coupons.
    pub total: Price,
    /// Line total after coupons.
    pub final_total: Price,
}

impl CartEntry {
    /// The quantity one step up, if the controls allow it.
    #[must_use]
    pub fn next_quantity(&self) -> Option<Quantity> {
        self.qty
            .checked_add(1)
            .and_then(|qty| Quantity::new(qty).ok())
    }

    /// The quantity one step down, if the controls allow it.
    ///
    /// An entry above the bound steps down to [`Quantity::MAX`].
    #[must_use]
    pub fn previous_quantity(&self) -> Option<Quantity> {
        if self.qty > u32::from(Quantity::MAX) {
            return Some(Quantity::MAX);
        }
        self.qty
            .checked_sub(1)
            .and_then(|qty| Quantity::new(qty).ok())
    }
}

/// Server-authoritative cart state.
///
/// Always replaced wholesale; the client never merges or recomputes totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    pub entries: Vec<CartEntry>,
    /// Sum of line totals before coupons.
    pub total: Price,
    /// Grand total shown to the shopper.
    pub final_total: Price,
}

impl CartSnapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its cart entry ID.
    #[must_use]
    pub fn entry(&self, id: &CartEntryId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Look up the entry holding a product.
    #[must_use]
    pub fn entry_for_product(&self, product_id: &ProductId) -> Option<&CartEntry> {
        self.entries
            .iter()
            .find(|entry| &entry.product_id == product_id)
    }

    /// Total number of units across all entries.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.entries.iter().map(|entry| entry.qty).sum()
    }
}

// =============================================================================
// Order Types
// =============================================================================

/// Recipient contact details for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    pub email: Email,
    pub name: String,
    pub tel: Phone,
    pub address: String,
}

/// A validated order. The server resolves the cart contents itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub user: Recipient,
    /// Free-text note, possibly empty.
    pub message: String,
}

/// The server's acknowledgement of a placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    /// Human-readable confirmation, shown verbatim.
    pub message: String,
    pub order_id: Option<OrderId>,
    pub total: Option<Price>,
}
