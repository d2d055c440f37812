//! Catalog filtering and sorting.
//!
//! A [`ListingQuery`] holds every user-chosen criterion. [`list`] annotates
//! each product with its minimum price, applies the search, color, storage
//! and price predicates in that order, then sorts. Each predicate is a pure
//! function exported on its own so it can be tested in isolation.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use istore_core::{Color, Price, StorageTier};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::catalog::{Catalog, Product};

/// Price ceiling of a fresh query (the top of the storefront's price slider).
pub const DEFAULT_PRICE_CEILING: Price = Price::new(1400);

/// Error returned when parsing an unknown sort order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid sort order: {0} (expected catalog-order, price-asc or price-desc)")]
pub struct SortOrderParseError(pub String);

/// Ordering of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Declaration order of the catalog. There is no relevance scoring.
    #[default]
    #[serde(alias = "relevance")]
    CatalogOrder,
    /// Cheapest minimum price first.
    PriceAsc,
    /// Most expensive minimum price first.
    PriceDesc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CatalogOrder => "catalog-order",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = SortOrderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "catalog-order" | "relevance" => Ok(Self::CatalogOrder),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            _ => Err(SortOrderParseError(s.to_owned())),
        }
    }
}

/// The complete set of filter and sort criteria for one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    /// Free-text search over name, tagline and description.
    pub search: String,
    /// Keep products offered in any of these colors (empty: no filter).
    pub colors: BTreeSet<Color>,
    /// Keep products offering any of these tiers (empty: no filter).
    pub storages: BTreeSet<StorageTier>,
    /// Drop products whose minimum price exceeds this.
    pub max_price: Price,
    pub sort: SortOrder,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self::with_price_ceiling(DEFAULT_PRICE_CEILING)
    }
}

impl ListingQuery {
    /// An unfiltered query with the given price ceiling.
    #[must_use]
    pub const fn with_price_ceiling(max_price: Price) -> Self {
        Self {
            search: String::new(),
            colors: BTreeSet::new(),
            storages: BTreeSet::new(),
            max_price,
            sort: SortOrder::CatalogOrder,
        }
    }

    /// Add storage tiers given as text, such as the values of a select box.
    ///
    /// Each value is normalized to a [`StorageTier`]; blank values are
    /// skipped and unparsable ones are ignored.
    pub fn extend_storages_from_text<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            let value = value.as_ref();
            if value.trim().is_empty() {
                continue;
            }
            match value.parse::<StorageTier>() {
                Ok(tier) => {
                    self.storages.insert(tier);
                }
                Err(e) => debug!(value, error = %e, "Ignoring storage filter value"),
            }
        }
    }

    /// Whether search, color or storage criteria narrow the listing.
    ///
    /// The price ceiling always applies and is not counted.
    #[must_use]
    pub fn is_narrowed(&self) -> bool {
        !self.search.trim().is_empty() || !self.colors.is_empty() || !self.storages.is_empty()
    }

    fn search_needle(&self) -> Option<String> {
        if self.search.trim().is_empty() {
            None
        } else {
            Some(self.search.to_lowercase())
        }
    }
}

/// A product annotated with its minimum price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedProduct<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    pub min_price: Price,
}

impl<'a> ListedProduct<'a> {
    #[must_use]
    pub fn new(product: &'a Product) -> Self {
        Self {
            product,
            min_price: product.min_price(),
        }
    }
}

impl Deref for ListedProduct<'_> {
    type Target = Product;

    fn deref(&self) -> &Self::Target {
        self.product
    }
}

/// The result of running a query against a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<'a> {
    entries: Vec<ListedProduct<'a>>,
    narrowed: bool,
}

impl<'a> Listing<'a> {
    #[must_use]
    pub fn entries(&self) -> &[ListedProduct<'a>] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListedProduct<'a>> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the query had search, color or storage criteria.
    #[must_use]
    pub const fn is_narrowed(&self) -> bool {
        self.narrowed
    }
}

impl<'l, 'a> IntoIterator for &'l Listing<'a> {
    type Item = &'l ListedProduct<'a>;
    type IntoIter = std::slice::Iter<'l, ListedProduct<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// =============================================================================
// Predicates
// =============================================================================

/// `needle` (already lower-cased) occurs in the name, tagline or description.
#[must_use]
pub fn matches_search(product: &Product, needle: &str) -> bool {
    [&product.name, &product.tagline, &product.description]
        .iter()
        .any(|text| text.to_lowercase().contains(needle))
}

/// The product is offered in at least one of `colors`, or `colors` is empty.
#[must_use]
pub fn offers_any_color(product: &Product, colors: &BTreeSet<Color>) -> bool {
    colors.is_empty() || product.colors.iter().any(|c| colors.contains(c))
}

/// The product offers at least one of `storages`, or `storages` is empty.
#[must_use]
pub fn offers_any_storage(product: &Product, storages: &BTreeSet<StorageTier>) -> bool {
    storages.is_empty() || product.storages.iter().any(|s| storages.contains(s))
}

/// The minimum price does not exceed `max_price`.
#[must_use]
pub fn within_budget(entry: &ListedProduct<'_>, max_price: Price) -> bool {
    entry.min_price <= max_price
}

/// Stable sort by minimum price; catalog order leaves `entries` untouched.
pub fn sort_entries(entries: &mut [ListedProduct<'_>], order: SortOrder) {
    match order {
        SortOrder::CatalogOrder => {}
        SortOrder::PriceAsc => entries.sort_by_key(|entry| entry.min_price),
        SortOrder::PriceDesc => entries.sort_by(|a, b| b.min_price.cmp(&a.min_price)),
    }
}

/// Run `query` against `catalog`.
#[instrument(skip(catalog), fields(products = catalog.len()))]
pub fn list<'a>(catalog: &'a Catalog, query: &ListingQuery) -> Listing<'a> {
    let needle = query.search_needle();

    let mut entries: Vec<ListedProduct<'a>> = catalog
        .iter()
        .map(ListedProduct::new)
        .filter(|entry| needle.as_deref().is_none_or(|n| matches_search(entry, n)))
        .filter(|entry| offers_any_color(entry, &query.colors))
        .filter(|entry| offers_any_storage(entry, &query.storages))
        .filter(|entry| within_budget(entry, query.max_price))
        .collect();

    sort_entries(&mut entries, query.sort);

    debug!(matches = entries.len(), "Catalog listed");
    Listing {
        entries,
        narrowed: query.is_narrowed(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use istore_core::ProductId;

    use super::*;

    fn tiers(gigabytes: &[u32]) -> Vec<StorageTier> {
        gigabytes
            .iter()
            .map(|g| StorageTier::new(*g).unwrap())
            .collect()
    }

    fn phone(id: &str, name: &str, base: u64, storages: &[u32], colors: &[Color]) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            tagline: format!("{name} tagline"),
            description: format!("The {name} phone."),
            base_price: Price::new(base),
            storages: tiers(storages),
            colors: colors.to_vec(),
            rating: 4.5,
            featured: false,
        }
    }

    /// Two products whose tiers (128/256 and 64/128) carry partial surcharges.
    fn two_phones() -> Catalog {
        Catalog::new(vec![
            phone("a", "iPhone A", 699, &[128, 256], &[Color::Black, Color::Blue]),
            phone("b", "iPhone B", 499, &[64, 128], &[Color::Red]),
        ])
        .unwrap()
    }

    fn ids(listing: &Listing<'_>) -> Vec<String> {
        listing.iter().map(|e| e.id.to_string()).collect()
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    #[test]
    fn test_unfiltered_keeps_catalog_order() {
        let catalog = two_phones();
        let listing = list(&catalog, &ListingQuery::default());
        assert_eq!(ids(&listing), ["a", "b"]);
        assert!(!listing.is_narrowed());
    }

    #[test]
    fn test_min_price_annotation() {
        let catalog = two_phones();
        let listing = list(&catalog, &ListingQuery::default());
        for entry in &listing {
            let expected = entry.storages.iter().map(|s| entry.price_for(*s)).min().unwrap();
            assert_eq!(entry.min_price, expected);
        }
        assert_eq!(listing.entries()[0].min_price, Price::new(699));
        assert_eq!(listing.entries()[1].min_price, Price::new(499));
    }

    #[test]
    fn test_storage_filter() {
        let catalog = two_phones();
        let mut query = ListingQuery::default();
        query.storages.insert(StorageTier::new(256).unwrap());
        assert_eq!(ids(&list(&catalog, &query)), ["a"]);
    }

    #[test]
    fn test_storage_filter_from_text() {
        let catalog = two_phones();
        let mut query = ListingQuery::default();
        query.extend_storages_from_text(["64", "", "not-a-tier"]);
        assert_eq!(query.storages.len(), 1);
        assert_eq!(ids(&list(&catalog, &query)), ["b"]);

        let mut query = ListingQuery::default();
        query.extend_storages_from_text(["128 GB"]);
        assert_eq!(ids(&list(&catalog, &query)), ["a", "b"]);
    }

    #[test]
    fn test_color_filter() {
        let catalog = two_phones();
        let mut query = ListingQuery::default();
        query.colors.insert(Color::Red);
        assert_eq!(ids(&list(&catalog, &query)), ["b"]);

        query.colors.insert(Color::Blue);
        assert_eq!(ids(&list(&catalog, &query)), ["a", "b"]);
    }

    #[test]
    fn test_price_ceiling() {
        let catalog = two_phones();
        let query = ListingQuery::with_price_ceiling(Price::new(500));
        let listing = list(&catalog, &query);
        assert_eq!(ids(&listing), ["b"]);
        assert!(!listing.is_narrowed());

        let query = ListingQuery::with_price_ceiling(Price::new(699));
        assert_eq!(ids(&list(&catalog, &query)), ["a", "b"]);
    }

    #[test]
    fn test_search_with_price_sort() {
        let catalog = two_phones();
        let query = ListingQuery {
            search: "iphone".to_string(),
            sort: SortOrder::PriceAsc,
            ..ListingQuery::default()
        };
        assert_eq!(ids(&list(&catalog, &query)), ["b", "a"]);

        let query = ListingQuery {
            sort: SortOrder::PriceDesc,
            ..query
        };
        assert_eq!(ids(&list(&catalog, &query)), ["a", "b"]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_covers_all_text() {
        let catalog = Catalog::demo();
        let query = ListingQuery {
            search: "TITANIUM".to_string(),
            ..ListingQuery::default()
        };
        assert_eq!(ids(&list(catalog, &query)), ["iphone-15-pro"]);

        let query = ListingQuery {
            search: "home button".to_string(),
            ..ListingQuery::default()
        };
        assert_eq!(ids(&list(catalog, &query)), ["iphone-se"]);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let catalog = two_phones();
        let query = ListingQuery {
            search: "   ".to_string(),
            ..ListingQuery::default()
        };
        let listing = list(&catalog, &query);
        assert_eq!(listing.len(), 2);
        assert!(!listing.is_narrowed());
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let catalog = two_phones();
        let query = ListingQuery {
            search: "galaxy".to_string(),
            ..ListingQuery::default()
        };
        let listing = list(&catalog, &query);
        assert!(listing.is_empty());
        assert!(listing.is_narrowed());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        assert!(list(&catalog, &ListingQuery::default()).is_empty());
    }

    #[test]
    fn test_sort_is_stable_for_equal_prices() {
        let catalog = Catalog::new(vec![
            phone("x", "X", 500, &[128], &[Color::Black]),
            phone("y", "Y", 300, &[128], &[Color::Black]),
            phone("z", "Z", 500, &[64], &[Color::Black]),
        ])
        .unwrap();

        let asc = ListingQuery {
            sort: SortOrder::PriceAsc,
            ..ListingQuery::default()
        };
        assert_eq!(ids(&list(&catalog, &asc)), ["y", "x", "z"]);

        let desc = ListingQuery {
            sort: SortOrder::PriceDesc,
            ..ListingQuery::default()
        };
        assert_eq!(ids(&list(&catalog, &desc)), ["x", "z", "y"]);
    }

    #[test]
    fn test_demo_catalog_price_sort() {
        let query = ListingQuery {
            sort: SortOrder::PriceAsc,
            ..ListingQuery::default()
        };
        assert_eq!(
            ids(&list(Catalog::demo(), &query)),
            ["iphone-se", "iphone-14", "iphone-15", "iphone-15-pro"]
        );
    }

    // =========================================================================
    // Predicates & parsing
    // =========================================================================

    #[test]
    fn test_predicates_accept_empty_sets() {
        let product = phone("a", "A", 1, &[128], &[Color::Gold]);
        assert!(offers_any_color(&product, &BTreeSet::new()));
        assert!(offers_any_storage(&product, &BTreeSet::new()));
        assert!(!offers_any_color(&product, &BTreeSet::from([Color::Green])));
    }

    #[test]
    fn test_within_budget_is_inclusive() {
        let product = phone("a", "A", 699, &[128], &[Color::Gold]);
        let entry = ListedProduct::new(&product);
        assert!(within_budget(&entry, Price::new(699)));
        assert!(!within_budget(&entry, Price::new(698)));
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("relevance".parse::<SortOrder>().unwrap(), SortOrder::CatalogOrder);
        assert_eq!("price-asc".parse::<SortOrder>().unwrap(), SortOrder::PriceAsc);
        assert_eq!(SortOrder::PriceDesc.to_string(), "price-desc");
        assert!("cheapest".parse::<SortOrder>().is_err());

        let order: SortOrder = serde_json::from_str("\"relevance\"").unwrap();
        assert_eq!(order, SortOrder::CatalogOrder);
    }

    #[test]
    fn test_listed_product_serializes_flat() {
        let product = phone("a", "A", 699, &[128, 256], &[Color::Gold]);
        let json = serde_json::to_value(ListedProduct::new(&product)).unwrap();
        assert_eq!(json["id"], "a");
        assert_eq!(json["basePrice"], 699);
        assert_eq!(json["minPrice"], 699);
    }
}
