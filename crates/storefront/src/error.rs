//! Controller-level error handling.
//!
//! Every controller operation catches its own failure, raises exactly one
//! notification and then returns a [`StoreError`] so a front end can decide
//! what to do next. Nothing is retried and no failure is fatal.

use pantry_core::ProductId;
use thiserror::Error;

use crate::api::ApiError;
use crate::checkout::FormErrors;

/// Shown when a page-level fetch fails.
pub const TRANSIENT_MESSAGE: &str = "頁面異常請稍後再試";

/// Shown when a quantity change fails.
pub const SYSTEM_MESSAGE: &str = "系統異常請稍後再試";

/// Prompt shown before emptying the cart.
pub const CONFIRM_CLEAR_CART: &str = "確認刪除全部？";

/// Application-level error type for the storefront controller.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A fetch failed; the shopper sees a fixed localized message.
    #[error("{}", TRANSIENT_MESSAGE)]
    TransientNetwork,

    /// The server refused a mutation; its message is shown verbatim.
    #[error("{0}")]
    ServerValidation(String),

    /// A quantity change failed; the shopper sees a generic message.
    #[error("{}", SYSTEM_MESSAGE)]
    System,

    /// The order form did not validate; no request was sent.
    #[error("Invalid order form: {0}")]
    InvalidForm(FormErrors),

    /// Checkout was attempted with an empty cart.
    #[error("Checkout is unavailable while the cart is empty")]
    CheckoutUnavailable,

    /// The product is not in the loaded catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Add-to-cart from the product view with no product open.
    #[error("No product is open")]
    NoProductSelected,

    /// The shopper declined a confirmation; no request was sent.
    #[error("Cancelled")]
    Cancelled,
}

impl StoreError {
    /// Classify a failed mutating call.
    ///
    /// A server answer becomes [`StoreError::ServerValidation`]; a call that
    /// never got an answer is treated as transient.
    #[must_use]
    pub fn from_mutation(err: &ApiError) -> Self {
        err.server_message().map_or(Self::TransientNetwork, |message| {
            Self::ServerValidation(message.to_string())
        })
    }

    /// Text for the one-shot notification.
    #[must_use]
    pub fn notification_text(&self) -> String {
        self.to_string()
    }
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
