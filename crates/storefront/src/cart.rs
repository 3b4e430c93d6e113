//! Cart synchronization.
//!
//! The server owns the cart. Every mutation is followed by a full re-fetch
//! and the returned snapshot replaces the local one wholesale; the client
//! never merges or recomputes totals.

use pantry_core::{CartEntryId, ProductId, Quantity};
use tracing::{info, instrument, warn};

use crate::api::{CartEntry, StoreApi};
use crate::error::{CONFIRM_CLEAR_CART, Result, StoreError};
use crate::notify::{NotificationPosition, Notifier};
use crate::state::Storefront;

/// Asks the shopper a yes/no question before a destructive action.
pub trait Confirm {
    fn confirm(&self, question: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, question: &str) -> bool {
        self(question)
    }
}

/// Which quantity buttons are enabled for a cart entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityControls {
    pub can_decrement: bool,
    pub can_increment: bool,
}

impl<A: StoreApi, N: Notifier> Storefront<A, N> {
    /// Load the server cart and replace the local snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TransientNetwork`]; the previous snapshot stays.
    #[instrument(skip(self))]
    pub async fn fetch_cart(&self) -> Result<()> {
        match self.api().cart().await {
            Ok(snapshot) => {
                info!(entries = snapshot.entries.len(), "Cart refreshed");
                self.write(|view| view.cart = snapshot.into());
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch cart");
                Err(self.fail(StoreError::TransientNetwork))
            }
        }
    }

    /// Load the catalog and the cart side by side.
    ///
    /// # Errors
    ///
    /// Returns the catalog error first, then the cart error. Both loads run
    /// to completion either way.
    pub async fn initialize(&self) -> Result<()> {
        let (catalog, cart) = tokio::join!(self.load_catalog(), self.fetch_cart());
        catalog.and(cart)
    }

    /// Add `qty` units of a product. Repeated adds accumulate server-side.
    ///
    /// On success shows the server message, closes the product view and
    /// re-fetches the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ServerValidation`] with the server's message, or
    /// [`StoreError::TransientNetwork`] when there was no answer.
    #[instrument(skip_all, fields(product_id = %product_id, qty = qty.get()))]
    pub async fn add_item(&self, product_id: &ProductId, qty: Quantity) -> Result<()> {
        let _loading = self.button_loading();

        match self.api().add_to_cart(product_id, qty).await {
            Ok(message) => {
                self.notify_success(message, NotificationPosition::TopEnd);
                self.close_product();
                self.fetch_cart().await
            }
            Err(e) => {
                warn!(error = %e, "Add to cart failed");
                Err(self.fail(StoreError::from_mutation(&e)))
            }
        }
    }

    /// Set a cart entry to `qty`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::System`]; the stale snapshot stays until the
    /// next fetch.
    #[instrument(skip_all, fields(entry_id = %entry.id, qty = qty.get()))]
    pub async fn change_quantity(&self, entry: &CartEntry, qty: Quantity) -> Result<()> {
        let _loading = self.button_loading();

        match self
            .api()
            .update_cart_entry(&entry.id, &entry.product_id, qty)
            .await
        {
            Ok(_) => self.fetch_cart().await,
            Err(e) => {
                warn!(error = %e, "Quantity change failed");
                Err(self.fail(StoreError::System))
            }
        }
    }

    /// Remove one cart entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ServerValidation`] with the server's message, or
    /// [`StoreError::TransientNetwork`] when there was no answer.
    #[instrument(skip_all, fields(entry_id = %entry_id))]
    pub async fn delete_item(&self, entry_id: &CartEntryId) -> Result<()> {
        let _loading = self.fullscreen_loading();

        match self.api().remove_cart_entry(entry_id).await {
            Ok(_) => self.fetch_cart().await,
            Err(e) => {
                warn!(error = %e, "Remove from cart failed");
                Err(self.fail(StoreError::from_mutation(&e)))
            }
        }
    }

    /// Empty the cart after the shopper confirms.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Cancelled`] without a request or a notification
    /// when declined; otherwise as [`Storefront::delete_item`].
    #[instrument(skip_all)]
    pub async fn delete_all(&self, confirm: &impl Confirm) -> Result<()> {
        if !confirm.confirm(CONFIRM_CLEAR_CART) {
            info!("Clear cart declined");
            return Err(StoreError::Cancelled);
        }

        let _loading = self.fullscreen_loading();

        match self.api().clear_cart().await {
            Ok(_) => self.fetch_cart().await,
            Err(e) => {
                warn!(error = %e, "Clear cart failed");
                Err(self.fail(StoreError::from_mutation(&e)))
            }
        }
    }
}

impl<A, N> Storefront<A, N> {
    /// Button state for an entry's quantity stepper.
    ///
    /// Both buttons are disabled while a button-level call is in flight.
    #[must_use]
    pub fn quantity_controls(&self, entry: &CartEntry) -> QuantityControls {
        let idle = !self.is_button_loading();
        QuantityControls {
            can_decrement: idle && entry.previous_quantity().is_some(),
            can_increment: idle && entry.next_quantity().is_some(),
        }
    }
}
