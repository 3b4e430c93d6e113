//! Pantry storefront library.
//!
//! A headless storefront controller for a hosted cart and order API:
//!
//! - [`api`] - the [`StoreApi`] seam and its `reqwest` client
//! - [`Storefront`] - catalog, cart snapshot, product view and loading
//!   flags, with one method per shopper action
//! - [`checkout`] - order form validation and submission
//! - [`notify`] - one-shot notifications handed to the front end
//!
//! ```no_run
//! use pantry_storefront::{StoreClient, Storefront, StorefrontConfig, TracingNotifier};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StorefrontConfig::from_env()?;
//! let store = Storefront::new(StoreClient::new(&config.api), TracingNotifier);
//! store.initialize().await?;
//! println!("{} products", store.products().len());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod notify;
pub mod state;

#[cfg(test)]
mod testing;

pub use api::{ApiError, StoreApi, StoreClient};
pub use cart::{Confirm, QuantityControls};
pub use catalog::ProductDetail;
pub use checkout::{FieldError, FormErrors, FormField, OrderForm};
pub use config::{ApiConfig, ConfigError, StorefrontConfig};
pub use error::{Result, StoreError};
pub use notify::{ChannelNotifier, Notification, Notifier, TracingNotifier};
pub use state::{LoadingState, Storefront};
