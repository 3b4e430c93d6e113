//! Product catalog loading and the product detail view.

use pantry_core::{ProductId, Quantity};
use tracing::{info, instrument, warn};

use crate::api::{Product, StoreApi};
use crate::error::{Result, StoreError};
use crate::notify::Notifier;
use crate::state::Storefront;

/// State behind the product modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetail {
    product: Product,
    /// Image the shopper picked; `None` shows the primary image.
    main_image: Option<String>,
    /// Pending quantity for add-to-cart.
    quantity: Quantity,
}

impl ProductDetail {
    fn open(product: Product) -> Self {
        Self {
            product,
            main_image: None,
            quantity: Quantity::MIN,
        }
    }

    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// The large image: the picked one, else the primary image.
    #[must_use]
    pub fn displayed_image(&self) -> &str {
        self.main_image
            .as_deref()
            .unwrap_or(&self.product.image_url)
    }
}

impl<A: StoreApi, N: Notifier> Storefront<A, N> {
    /// Fetch the full catalog and replace the loaded one.
    ///
    /// On failure the previous catalog stays in place.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TransientNetwork`] after notifying the shopper.
    #[instrument(skip(self))]
    pub async fn load_catalog(&self) -> Result<()> {
        let _loading = self.fullscreen_loading();

        match self.api().products().await {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                self.write(|view| view.products = products.into());
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load catalog");
                Err(self.fail(StoreError::TransientNetwork))
            }
        }
    }

    /// Open the product view for a catalog product.
    ///
    /// Resets the picked image and the pending quantity to 1.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProductNotFound`] if the product is not loaded.
    pub fn open_product(&self, id: &ProductId) -> Result<ProductDetail> {
        let product = self
            .product(id)
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))?;
        let detail = ProductDetail::open(product);
        self.write(|view| view.detail = Some(detail.clone()));
        Ok(detail)
    }

    /// Show `url` as the large image. Returns `false` if no product is open
    /// or the URL is not one of its images.
    pub fn select_image(&self, url: &str) -> bool {
        self.write(|view| match view.detail.as_mut() {
            Some(detail) if detail.product.has_image(url) => {
                detail.main_image = Some(url.to_string());
                true
            }
            _ => false,
        })
    }

    /// Raise the pending quantity. `None` at the upper bound or with no
    /// product open.
    pub fn increment_quantity(&self) -> Option<Quantity> {
        self.step_quantity(Quantity::increment)
    }

    /// Lower the pending quantity. `None` at the lower bound or with no
    /// product open.
    pub fn decrement_quantity(&self) -> Option<Quantity> {
        self.step_quantity(Quantity::decrement)
    }

    fn step_quantity(&self, step: fn(Quantity) -> Option<Quantity>) -> Option<Quantity> {
        self.write(|view| {
            let detail = view.detail.as_mut()?;
            let next = step(detail.quantity)?;
            detail.quantity = next;
            Some(next)
        })
    }

    /// Add the open product at its pending quantity. Success closes the view.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoProductSelected`] when nothing is open, or the
    /// error from [`Storefront::add_item`].
    pub async fn add_selected_to_cart(&self) -> Result<()> {
        let (product_id, qty) = self
            .detail()
            .map(|detail| (detail.product.id, detail.quantity))
            .ok_or(StoreError::NoProductSelected)?;
        self.add_item(&product_id, qty).await
    }
}

impl<A, N> Storefront<A, N> {
    /// Look up a product in the loaded catalog.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<Product> {
        self.read(|view| view.products.iter().find(|p| &p.id == id).cloned())
    }

    /// The open product view, if any.
    #[must_use]
    pub fn detail(&self) -> Option<ProductDetail> {
        self.read(|view| view.detail.clone())
    }

    /// Hide the product view.
    pub fn close_product(&self) {
        self.write(|view| view.detail = None);
    }
}
