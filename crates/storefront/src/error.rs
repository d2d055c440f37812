//! Unified error handling.
//!
//! Core cart and listing operations never fail, and storage failures are
//! logged rather than returned. `AppError` covers the edges that can fail:
//! loading configuration, resolving a product configuration, and confirming
//! an order. `CatalogError` is returned directly by `Catalog::new`.

use istore_core::{Color, ProductId, StorageTier};
use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Order could not be confirmed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// No product has this id.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The product is not sold with this storage tier.
    #[error("{product} is not available with {storage}")]
    StorageUnavailable {
        product: ProductId,
        storage: StorageTier,
    },

    /// The product is not sold in this color.
    #[error("{product} is not available in {color}")]
    ColorUnavailable { product: ProductId, color: Color },
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
