//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! istore cart add iphone-15 --storage 256 --color blue
//! istore cart qty iphone-15 256 blue 2
//! istore cart remove iphone-15 256 blue
//! istore cart show --json
//! istore cart clear
//! ```
//!
//! Lines are addressed by product id, storage tier and color.

use std::io::Write;

use istore_core::{Color, ProductId, StorageTier};
use istore_storefront::{LineKey, Storefront};

use super::CliError;

/// Print the cart lines and totals.
///
/// # Errors
///
/// Returns `CliError::Io` or `CliError::Json` if the output cannot be written.
pub fn show(shop: &Storefront, json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    if json {
        serde_json::to_writer_pretty(&mut *out, shop.cart_items())?;
        writeln!(out)?;
        return Ok(());
    }

    if shop.cart_items().is_empty() {
        writeln!(out, "Your cart is empty.")?;
        return Ok(());
    }

    for item in shop.cart_items() {
        writeln!(
            out,
            "{} x {} ({}, {})  {} each  {}",
            item.qty,
            item.name,
            item.storage,
            item.color,
            item.price,
            item.line_total()
        )?;
    }
    writeln!(out, "Items: {}", shop.cart_item_count())?;
    writeln!(out, "Shipping: Free")?;
    writeln!(out, "Total: {}", shop.cart_total())?;
    Ok(())
}

/// Add one unit of `product_id`.
///
/// # Errors
///
/// Returns `CliError::App` if the product or configuration does not exist.
pub fn add(
    shop: &mut Storefront,
    product_id: &str,
    storage: Option<StorageTier>,
    color: Option<Color>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let key = shop.add_product(product_id, storage, color)?;
    if let Some(line) = shop.cart_line(&key) {
        writeln!(
            out,
            "Added {} ({}, {}) at {}; {} in cart",
            line.name, line.storage, line.color, line.price, line.qty
        )?;
    }
    Ok(())
}

/// Set the quantity of an existing line.
///
/// # Errors
///
/// Returns `CliError::NotInCart` if no line matches.
pub fn set_qty(
    shop: &mut Storefront,
    product_id: &str,
    storage: StorageTier,
    color: Color,
    qty: i64,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let key = existing_line(shop, product_id, storage, color)?;
    shop.update_cart_qty(&key, qty);
    if let Some(line) = shop.cart_line(&key) {
        writeln!(out, "{key}: quantity {}", line.qty)?;
    }
    Ok(())
}

/// Remove an existing line.
///
/// # Errors
///
/// Returns `CliError::NotInCart` if no line matches.
pub fn remove(
    shop: &mut Storefront,
    product_id: &str,
    storage: StorageTier,
    color: Color,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let key = existing_line(shop, product_id, storage, color)?;
    shop.remove_from_cart(&key);
    writeln!(out, "Removed {key}")?;
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `CliError::Io` if the output cannot be written.
pub fn clear(shop: &mut Storefront, out: &mut dyn Write) -> Result<(), CliError> {
    shop.clear_cart();
    writeln!(out, "Cart cleared.")?;
    Ok(())
}

fn existing_line(
    shop: &Storefront,
    product_id: &str,
    storage: StorageTier,
    color: Color,
) -> Result<LineKey, CliError> {
    let key = LineKey::new(ProductId::new(product_id), storage, color);
    if shop.cart_line(&key).is_none() {
        return Err(CliError::NotInCart(key));
    }
    Ok(key)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use istore_storefront::{AppError, StorefrontConfig};

    use super::*;

    fn tier(gigabytes: u32) -> StorageTier {
        StorageTier::new(gigabytes).unwrap()
    }

    fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_add_reports_merged_quantity() {
        let mut shop = Storefront::ephemeral(StorefrontConfig::default());
        let mut out = Vec::new();
        add(&mut shop, "iphone-15", Some(tier(256)), Some(Color::Blue), &mut out).unwrap();
        add(&mut shop, "iphone-15", Some(tier(256)), Some(Color::Blue), &mut out).unwrap();

        assert_eq!(
            text(out),
            "Added iPhone 15 (256 GB, blue) at $919; 1 in cart\n\
             Added iPhone 15 (256 GB, blue) at $919; 2 in cart\n"
        );
    }

    #[test]
    fn test_add_unknown_product() {
        let mut shop = Storefront::ephemeral(StorefrontConfig::default());
        let result = add(&mut shop, "pixel-8", None, None, &mut Vec::new());
        assert!(matches!(
            result,
            Err(CliError::App(AppError::ProductNotFound(_)))
        ));
    }

    #[test]
    fn test_show_lists_lines_and_totals() {
        let mut shop = Storefront::ephemeral(StorefrontConfig::default());
        shop.add_product("iphone-se", None, Some(Color::Red)).unwrap();
        shop.add_product("iphone-se", None, Some(Color::Red)).unwrap();

        let mut out = Vec::new();
        show(&shop, false, &mut out).unwrap();
        assert_eq!(
            text(out),
            "2 x iPhone SE (64 GB, red)  $499 each  $998\n\
             Items: 2\n\
             Shipping: Free\n\
             Total: $998\n"
        );
    }

    #[test]
    fn test_show_json_uses_snapshot_shape() {
        let mut shop = Storefront::ephemeral(StorefrontConfig::default());
        shop.add_product("iphone-14", None, None).unwrap();

        let mut out = Vec::new();
        show(&shop, true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let line = value.as_array().unwrap().first().unwrap();
        assert_eq!(line["productId"], "iphone-14");
        assert_eq!(line["qty"], 1);
    }

    #[test]
    fn test_qty_clamps_and_reports() {
        let mut shop = Storefront::ephemeral(StorefrontConfig::default());
        shop.add_product("iphone-14", None, None).unwrap();

        let mut out = Vec::new();
        set_qty(&mut shop, "iphone-14", tier(128), Color::Black, -5, &mut out).unwrap();
        assert_eq!(text(out), "iphone-14 (128 GB, black): quantity 1\n");
    }

    #[test]
    fn test_missing_line_is_reported() {
        let mut shop = Storefront::ephemeral(StorefrontConfig::default());
        let result = remove(&mut shop, "iphone-14", tier(128), Color::Black, &mut Vec::new());
        assert!(matches!(result, Err(CliError::NotInCart(_))));

        let result = set_qty(&mut shop, "iphone-14", tier(128), Color::Black, 2, &mut Vec::new());
        assert!(matches!(result, Err(CliError::NotInCart(_))));
    }
}
