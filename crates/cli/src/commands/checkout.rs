//! `pantry checkout`

use std::fmt::Write;

use pantry_storefront::api::OrderReceipt;
use pantry_storefront::{FormErrors, OrderForm, StoreError};

use super::{Store, emit};
use crate::CliError;

/// Place an order for the current server cart.
///
/// Field errors are listed one per line before the command fails.
pub async fn place_order(store: &Store, form: &mut OrderForm) -> Result<(), CliError> {
    store.fetch_cart().await?;

    match store.submit_order(form).await {
        Ok(receipt) => {
            emit(&format_receipt(&receipt));
            Ok(())
        }
        Err(StoreError::InvalidForm(errors)) => {
            report_form_errors(&errors);
            Err(StoreError::InvalidForm(errors).into())
        }
        Err(e) => Err(e.into()),
    }
}

#[allow(clippy::print_stderr)]
fn report_form_errors(errors: &FormErrors) {
    for (field, error) in errors.iter() {
        eprintln!("  {field}: {error}");
    }
}

fn format_receipt(receipt: &OrderReceipt) -> String {
    let mut out = String::new();
    if let Some(order_id) = &receipt.order_id {
        let _ = writeln!(out, "訂單編號: {order_id}");
    }
    if let Some(total) = &receipt.total {
        let _ = writeln!(out, "訂單金額: {total}");
    }
    out
}
