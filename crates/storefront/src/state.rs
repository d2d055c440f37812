//! The storefront facade handed to the presentation layer.
//!
//! `Storefront` owns the catalog, the persisted cart and the theme
//! preference, and exposes every operation the front-end needs. It is
//! created once at startup and mutated only through `&mut self`, so there
//! is exactly one writer at a time.

use std::sync::Arc;

use istore_core::{Color, ContactDetails, Price, StorageTier, Theme};
use tracing::instrument;

use crate::cart::{CartStore, LineItem, LineKey, Selection};
use crate::catalog::{Catalog, Product};
use crate::checkout::OrderConfirmation;
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::listing::{self, Listing, ListingQuery};
use crate::pricing;
use crate::storage::{FileStore, MemoryStore, SharedStore};
use crate::theme::ThemePreference;

/// Catalog, cart and theme state for one storefront session.
#[derive(Debug)]
pub struct Storefront {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    cart: CartStore,
    theme: ThemePreference,
}

impl Storefront {
    /// Create a storefront over `catalog`, restoring cart and theme from
    /// `store`.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Products on sale
    /// * `store` - Durable storage for the cart and theme
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Arc<Catalog>, store: SharedStore) -> Self {
        let cart = CartStore::restore(Arc::clone(&store));
        let theme = ThemePreference::load(store, config.preferred_theme);
        Self {
            config,
            catalog,
            cart,
            theme,
        }
    }

    /// Demo catalog persisted to files under `config.data_dir`.
    #[must_use]
    pub fn open(config: StorefrontConfig) -> Self {
        let store: SharedStore = Arc::new(FileStore::new(config.data_dir.clone()));
        tracing::info!(data_dir = %config.data_dir.display(), "Opening storefront");
        Self::new(config, Arc::new(Catalog::demo().clone()), store)
    }

    /// Demo catalog with state held only in memory.
    #[must_use]
    pub fn ephemeral(config: StorefrontConfig) -> Self {
        Self::new(
            config,
            Arc::new(Catalog::demo().clone()),
            Arc::new(MemoryStore::new()),
        )
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Shared handle to the catalog.
    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.catalog.get(id)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// A query with no criteria and the configured price ceiling.
    #[must_use]
    pub const fn default_query(&self) -> ListingQuery {
        ListingQuery::with_price_ceiling(self.config.price_ceiling)
    }

    /// Filter and sort the catalog.
    #[must_use]
    pub fn filtered_catalog(&self, query: &ListingQuery) -> Listing<'_> {
        listing::list(&self.catalog, query)
    }

    /// Price of a product with `base_price` configured with `storage`.
    #[must_use]
    pub fn compute_price(base_price: Price, storage: StorageTier) -> Price {
        pricing::price(base_price, storage)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of `product` as configured. Returns the line's quantity.
    #[instrument(skip(self, product), fields(product = %product.id))]
    pub fn add_to_cart(&mut self, product: &Product, selection: Selection) -> u32 {
        self.cart.add(product, selection)
    }

    /// Add one unit of the product with `id`, priced now.
    ///
    /// Storage and color default to the product's first options.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ProductNotFound` for an unknown id and
    /// `AppError::StorageUnavailable` / `AppError::ColorUnavailable` if the
    /// product is not sold in the requested configuration.
    #[instrument(skip(self))]
    pub fn add_product(
        &mut self,
        id: &str,
        storage: Option<StorageTier>,
        color: Option<Color>,
    ) -> Result<LineKey> {
        let catalog = Arc::clone(&self.catalog);
        let product = catalog
            .get(id)
            .ok_or_else(|| AppError::ProductNotFound(id.to_owned()))?;
        let selection = resolve_selection(product, storage, color)?;

        self.cart.add(product, selection);
        Ok(LineKey::new(
            product.id.clone(),
            selection.storage,
            selection.color,
        ))
    }

    /// Set a line's quantity; values below 1 become 1.
    #[instrument(skip(self))]
    pub fn update_cart_qty(&mut self, key: &LineKey, qty: i64) {
        self.cart.update_qty(key, qty);
    }

    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, key: &LineKey) {
        self.cart.remove(key);
    }

    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart.total()
    }

    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.cart.item_count()
    }

    #[must_use]
    pub fn cart_items(&self) -> &[LineItem] {
        self.cart.items()
    }

    #[must_use]
    pub fn cart_line(&self, key: &LineKey) -> Option<&LineItem> {
        self.cart.cart().get(key)
    }

    /// Confirm the order and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Checkout` if the cart is empty.
    #[instrument(skip(self, contact))]
    pub fn checkout(&mut self, contact: &ContactDetails) -> Result<OrderConfirmation> {
        Ok(self.cart.checkout(contact)?)
    }

    // =========================================================================
    // Theme
    // =========================================================================

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme.set(theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle()
    }
}

/// Fill in defaults and check the product is sold as requested.
fn resolve_selection(
    product: &Product,
    storage: Option<StorageTier>,
    color: Option<Color>,
) -> Result<Selection> {
    let defaults = product
        .default_selection()
        .ok_or_else(|| AppError::ProductNotFound(product.id.to_string()))?;

    let storage = storage.unwrap_or(defaults.storage);
    if !product.offers_storage(storage) {
        return Err(AppError::StorageUnavailable {
            product: product.id.clone(),
            storage,
        });
    }

    let color = color.unwrap_or(defaults.color);
    if !product.offers_color(color) {
        return Err(AppError::ColorUnavailable {
            product: product.id.clone(),
            color,
        });
    }

    Ok(Selection {
        storage,
        color,
        price: product.price_for(storage),
    })
}
