//! CLI command implementations.
//!
//! Each command builds one [`Store`], runs the controller operations it
//! needs and prints the resulting view to stdout.

pub mod cart;
pub mod catalog;
pub mod checkout;

use pantry_storefront::{StoreClient, Storefront, StorefrontConfig};

use crate::console::ConsoleNotifier;

/// The controller as the CLI wires it.
pub type Store = Storefront<StoreClient, ConsoleNotifier>;

/// Build a controller against the configured API.
pub fn connect(config: &StorefrontConfig) -> Store {
    Storefront::new(StoreClient::new(&config.api), ConsoleNotifier)
}

/// Write a rendered view to stdout.
#[allow(clippy::print_stdout)]
fn emit(view: &str) {
    print!("{view}");
}
