//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! # Everything under the configured price ceiling
//! istore catalog
//!
//! # Blue or red phones with 256 GB, cheapest first
//! istore catalog --color blue,red --storage 256 --sort price-asc
//!
//! # Machine-readable listing
//! istore catalog --search pro --json
//!
//! # Price one configuration
//! istore price iphone-15-pro 512
//!
//! # Palette swatches
//! istore colors
//! ```

use std::io::Write;

use istore_core::{Color, StorageTier};
use istore_storefront::{AppError, ListedProduct, ListingQuery, Storefront};

use super::{CliError, join};

/// Print the products matching `query`.
///
/// # Errors
///
/// Returns `CliError::Io` or `CliError::Json` if the output cannot be written.
pub fn list(
    shop: &Storefront,
    query: &ListingQuery,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let listing = shop.filtered_catalog(query);
    tracing::debug!(
        results = listing.len(),
        narrowed = listing.is_narrowed(),
        sort = %query.sort,
        "Listed catalog"
    );

    if json {
        serde_json::to_writer_pretty(&mut *out, listing.entries())?;
        writeln!(out)?;
        return Ok(());
    }

    if listing.is_empty() {
        if listing.is_narrowed() {
            writeln!(out, "No products match those filters.")?;
        } else {
            writeln!(out, "No products under {}.", query.max_price)?;
        }
        return Ok(());
    }

    for entry in &listing {
        write_entry(entry, out)?;
    }
    writeln!(
        out,
        "{} of {} products",
        listing.len(),
        shop.catalog().len()
    )?;
    Ok(())
}

fn write_entry(entry: &ListedProduct<'_>, out: &mut dyn Write) -> Result<(), CliError> {
    let badge = if entry.featured { " [featured]" } else { "" };
    writeln!(out, "{} ({}){badge}", entry.name, entry.id)?;
    writeln!(out, "  {}", entry.tagline)?;
    writeln!(
        out,
        "  from {} | rating {:.1} | {} | {}",
        entry.min_price,
        entry.rating,
        join(&entry.storages),
        join(&entry.colors)
    )?;
    writeln!(out)?;
    Ok(())
}

/// Print the price of `product_id` configured with `storage`.
///
/// # Errors
///
/// Returns `AppError::ProductNotFound` for an unknown product.
pub fn price(
    shop: &Storefront,
    product_id: &str,
    storage: StorageTier,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let product = shop
        .product(product_id)
        .ok_or_else(|| AppError::ProductNotFound(product_id.to_owned()))?;
    let price = Storefront::compute_price(product.base_price, storage);

    if product.offers_storage(storage) {
        writeln!(out, "{} with {storage}: {price}", product.name)?;
    } else {
        writeln!(
            out,
            "{} with {storage}: {price} (not offered; sold with {})",
            product.name,
            join(&product.storages)
        )?;
    }
    Ok(())
}

/// Print every palette color with its swatch hex value.
///
/// # Errors
///
/// Returns `CliError::Io` if the output cannot be written.
pub fn palette(out: &mut dyn Write) -> Result<(), CliError> {
    for color in Color::ALL {
        writeln!(out, "{:<10}{}", color.as_str(), color.hex())?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use istore_core::Price;
    use istore_storefront::{SortOrder, StorefrontConfig};

    use super::*;

    fn shop() -> Storefront {
        Storefront::ephemeral(StorefrontConfig::default())
    }

    fn render(shop: &Storefront, query: &ListingQuery, json: bool) -> String {
        let mut out = Vec::new();
        list(shop, query, json, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    // =========================================================================
    // Listing
    // =========================================================================

    #[test]
    fn test_list_default_query_shows_all_products() {
        let shop = shop();
        let text = render(&shop, &shop.default_query(), false);

        assert!(text.starts_with("iPhone 15 Pro (iphone-15-pro) [featured]\n"));
        assert!(text.contains("from $499 | rating 4.4 | 64 GB, 128 GB, 256 GB | black, white, red"));
        assert!(text.ends_with("4 of 4 products\n"));
    }

    #[test]
    fn test_list_narrowed_without_matches() {
        let shop = shop();
        let mut query = shop.default_query();
        query.colors.insert(Color::Gold);

        assert_eq!(render(&shop, &query, false), "No products match those filters.\n");
    }

    #[test]
    fn test_list_empty_under_price_ceiling() {
        let shop = shop();
        let query = ListingQuery::with_price_ceiling(Price::new(100));

        assert_eq!(render(&shop, &query, false), "No products under $100.\n");
    }

    #[test]
    fn test_list_json_includes_min_price() {
        let shop = shop();
        let mut query = shop.default_query();
        query.sort = SortOrder::PriceAsc;

        let value: serde_json::Value = serde_json::from_str(&render(&shop, &query, true)).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries.first().unwrap()["id"], "iphone-se");
        assert_eq!(entries.first().unwrap()["minPrice"], 499);
    }

    // =========================================================================
    // Price
    // =========================================================================

    #[test]
    fn test_price_offered_and_unoffered_tier() {
        let shop = shop();
        let mut out = Vec::new();
        price(&shop, "iphone-15-pro", StorageTier::new(512).unwrap(), &mut out).unwrap();
        price(&shop, "iphone-se", StorageTier::new(1024).unwrap(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("iPhone 15 Pro with 512 GB: $1,319\n"));
        assert!(text.contains("iPhone SE with 1024 GB: $1,119 (not offered; sold with 64 GB, 128 GB, 256 GB)\n"));
    }

    #[test]
    fn test_palette_shows_swatches() {
        let mut out = Vec::new();
        palette(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("titanium  #9a9fab\n"));
        assert!(text.ends_with("gold      #c7a35a\n"));
    }

    #[test]
    fn test_price_unknown_product() {
        let shop = shop();
        let result = price(&shop, "pixel-8", StorageTier::new(128).unwrap(), &mut Vec::new());
        assert!(matches!(
            result,
            Err(CliError::App(AppError::ProductNotFound(_)))
        ));
    }
}
