//! Catalog commands.

use std::fmt::Write;

use pantry_core::ProductId;
use pantry_storefront::ProductDetail;
use pantry_storefront::api::Product;

use super::{Store, emit};
use crate::CliError;

/// `pantry products`
pub async fn list(store: &Store) -> Result<(), CliError> {
    store.load_catalog().await?;
    emit(&format_catalog(&store.products()));
    Ok(())
}

/// `pantry product <id>`
pub async fn show(store: &Store, id: &ProductId) -> Result<(), CliError> {
    store.load_catalog().await?;
    let detail = store.open_product(id)?;
    emit(&format_detail(&detail));
    Ok(())
}

fn price_label(product: &Product) -> String {
    match &product.origin_price {
        Some(origin) if product.is_discounted() => format!("{} (原價 {origin})", product.price),
        _ => product.price.to_string(),
    }
}

fn format_catalog(products: &[Product]) -> String {
    if products.is_empty() {
        return "目前沒有商品\n".to_string();
    }

    let mut out = String::new();
    for product in products {
        let _ = write!(
            out,
            "{}  {}  [{}]  {}",
            product.id,
            product.title,
            product.category,
            price_label(product)
        );
        if let Some(unit) = &product.unit {
            let _ = write!(out, " / {unit}");
        }
        out.push('\n');
    }
    out
}

fn format_detail(detail: &ProductDetail) -> String {
    let product = detail.product();
    let mut out = String::new();

    let _ = writeln!(out, "{}", product.title);
    let _ = writeln!(out, "  ID:     {}", product.id);
    let _ = writeln!(out, "  分類:   {}", product.category);
    let _ = writeln!(out, "  價格:   {}", price_label(product));
    if let Some(unit) = &product.unit {
        let _ = writeln!(out, "  單位:   {unit}");
    }
    if !product.content.is_empty() {
        let _ = writeln!(out, "  內容:   {}", product.content);
    }
    if !product.description.is_empty() {
        let _ = writeln!(out, "\n{}\n", product.description);
    }
    let _ = writeln!(out, "  圖片:   {}", detail.displayed_image());
    for image in product.gallery().filter(|url| *url != detail.displayed_image()) {
        let _ = writeln!(out, "          {image}");
    }
    out
}
