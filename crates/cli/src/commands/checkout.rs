//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! istore checkout --name "Ada Lovelace" --email ada@example.com --address "1 Main St"
//! ```

use std::io::Write;

use istore_core::ContactDetails;
use istore_storefront::Storefront;

use super::CliError;

/// Validate the contact details, confirm the order and print the receipt.
///
/// # Errors
///
/// Returns `CliError::Contact` for invalid details and `CliError::App` if
/// the cart is empty.
pub fn place_order(
    shop: &mut Storefront,
    name: &str,
    email: &str,
    address: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let contact = ContactDetails::parse(name, email, address)?;
    let confirmation = shop.checkout(&contact)?;

    writeln!(
        out,
        "Order #{:05} confirmed for {}",
        confirmation.order_number, confirmation.customer_name
    )?;
    writeln!(
        out,
        "{} item(s), total {}",
        confirmation.item_count, confirmation.total
    )?;
    writeln!(out, "Shipping to {}", confirmation.shipping_address)?;
    writeln!(out, "Confirmation sent to {}", confirmation.email)?;
    Ok(())
}
