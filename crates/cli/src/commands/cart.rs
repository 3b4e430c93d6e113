//! Cart commands. Every command ends by printing the refreshed cart.

use std::fmt::Write;

use pantry_core::{CartEntryId, ProductId, Quantity};
use pantry_storefront::api::CartSnapshot;

use super::{Store, emit};
use crate::CliError;
use crate::console::StdinConfirm;

/// `pantry cart`
pub async fn show(store: &Store) -> Result<(), CliError> {
    store.fetch_cart().await?;
    emit(&format_cart(&store.cart()));
    Ok(())
}

/// `pantry add <product-id> [--qty N]`
pub async fn add(store: &Store, product_id: &ProductId, qty: Quantity) -> Result<(), CliError> {
    store.add_item(product_id, qty).await?;
    emit(&format_cart(&store.cart()));
    Ok(())
}

/// `pantry set-qty <entry-id> <qty>`
pub async fn set_quantity(
    store: &Store,
    entry_id: &CartEntryId,
    qty: Quantity,
) -> Result<(), CliError> {
    store.fetch_cart().await?;
    let entry = store
        .cart()
        .entry(entry_id)
        .cloned()
        .ok_or_else(|| CliError::EntryNotFound(entry_id.clone()))?;

    store.change_quantity(&entry, qty).await?;
    emit(&format_cart(&store.cart()));
    Ok(())
}

/// `pantry remove <entry-id>`
pub async fn remove(store: &Store, entry_id: &CartEntryId) -> Result<(), CliError> {
    store.delete_item(entry_id).await?;
    emit(&format_cart(&store.cart()));
    Ok(())
}

/// `pantry clear [--yes]`
pub async fn clear(store: &Store, yes: bool) -> Result<(), CliError> {
    if yes {
        store.delete_all(&|_: &str| true).await?;
    } else {
        store.delete_all(&StdinConfirm).await?;
    }
    emit(&format_cart(&store.cart()));
    Ok(())
}

fn format_cart(cart: &CartSnapshot) -> String {
    if cart.is_empty() {
        return "購物車是空的\n".to_string();
    }

    let mut out = String::new();
    for entry in &cart.entries {
        let _ = writeln!(
            out,
            "{}  {} x{}  {}",
            entry.id, entry.product.title, entry.qty, entry.final_total
        );
    }
    let _ = writeln!(out, "共 {} 件", cart.item_count());
    if cart.final_total != cart.total {
        let _ = writeln!(out, "小計: {}", cart.total);
    }
    let _ = writeln!(out, "總計: {}", cart.final_total);
    out
}
