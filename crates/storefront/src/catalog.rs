//! The product catalog.
//!
//! The catalog is defined once and never mutated. [`Catalog::demo`] holds
//! the four phones the storefront ships with; [`Catalog::new`] builds a
//! custom catalog after checking every product definition.

use std::collections::HashSet;
use std::sync::LazyLock;

use istore_core::{Color, Price, ProductId, StorageTier};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Selection;
use crate::pricing;

/// Errors found while validating product definitions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    #[error("product {0} offers no storage tiers")]
    NoStorages(ProductId),
    #[error("product {0} offers no colors")]
    NoColors(ProductId),
    #[error("product {product} lists storage tier {storage} twice")]
    DuplicateStorage {
        product: ProductId,
        storage: StorageTier,
    },
    #[error("product {product} lists color {color} twice")]
    DuplicateColor { product: ProductId, color: Color },
    #[error("product {product} has rating {rating} outside 0..=5")]
    RatingOutOfRange { product: ProductId, rating: f32 },
}

/// A product definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub tagline: String,
    pub description: String,
    /// Price at the lowest storage tier.
    pub base_price: Price,
    /// Offered capacity tiers, in display order.
    pub storages: Vec<StorageTier>,
    /// Offered finishes, in display order.
    pub colors: Vec<Color>,
    pub rating: f32,
    pub featured: bool,
}

impl Product {
    /// Price of this product configured with `storage`.
    #[must_use]
    pub fn price_for(&self, storage: StorageTier) -> Price {
        pricing::price(self.base_price, storage)
    }

    /// Lowest price across every offered storage tier.
    #[must_use]
    pub fn min_price(&self) -> Price {
        pricing::min_price(self.base_price, &self.storages)
    }

    #[must_use]
    pub fn offers_storage(&self, storage: StorageTier) -> bool {
        self.storages.contains(&storage)
    }

    #[must_use]
    pub fn offers_color(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    /// The configuration a product card starts with: first tier, first color.
    #[must_use]
    pub fn default_selection(&self) -> Option<Selection> {
        let storage = *self.storages.first()?;
        let color = *self.colors.first()?;
        Some(Selection {
            storage,
            color,
            price: self.price_for(storage),
        })
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.storages.is_empty() {
            return Err(CatalogError::NoStorages(self.id.clone()));
        }
        if self.colors.is_empty() {
            return Err(CatalogError::NoColors(self.id.clone()));
        }

        let mut seen_storages = HashSet::new();
        if let Some(storage) = self.storages.iter().find(|s| !seen_storages.insert(**s)) {
            return Err(CatalogError::DuplicateStorage {
                product: self.id.clone(),
                storage: *storage,
            });
        }

        let mut seen_colors = HashSet::new();
        if let Some(color) = self.colors.iter().find(|c| !seen_colors.insert(**c)) {
            return Err(CatalogError::DuplicateColor {
                product: self.id.clone(),
                color: *color,
            });
        }

        if !(0.0..=5.0).contains(&self.rating) {
            return Err(CatalogError::RatingOutOfRange {
                product: self.id.clone(),
                rating: self.rating,
            });
        }

        Ok(())
    }
}

/// An immutable, ordered list of products.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

static DEMO_CATALOG: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    products: demo_products(),
});

impl Catalog {
    /// Build a catalog from product definitions, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if two products share an id, or if a product
    /// has no storage tiers or colors, repeats a tier or color, or has a
    /// rating outside `0..=5`.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        for product in &products {
            product.validate()?;
            if !ids.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// The catalog the storefront ships with.
    #[must_use]
    pub fn demo() -> &'static Self {
        &DEMO_CATALOG
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

fn tiers(gigabytes: &[u32]) -> Vec<StorageTier> {
    gigabytes.iter().copied().filter_map(StorageTier::new).collect()
}

fn demo_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new("iphone-15-pro"),
            name: "iPhone 15 Pro".to_string(),
            tagline: "Titanium. Pro power.".to_string(),
            description: "The iPhone 15 Pro delivers incredible performance with the A17 chip \
                          and an ultralight titanium design."
                .to_string(),
            base_price: Price::new(999),
            storages: tiers(&[128, 256, 512, 1024]),
            colors: vec![Color::Titanium, Color::Black, Color::Blue, Color::White],
            rating: 4.9,
            featured: true,
        },
        Product {
            id: ProductId::new("iphone-15"),
            name: "iPhone 15".to_string(),
            tagline: "Color and performance for everyone.".to_string(),
            description: "Super Retina XDR display and an advanced camera for stunning photos \
                          and videos."
                .to_string(),
            base_price: Price::new(799),
            storages: tiers(&[128, 256, 512]),
            colors: vec![
                Color::Black,
                Color::Blue,
                Color::Green,
                Color::Red,
                Color::White,
            ],
            rating: 4.7,
            featured: true,
        },
        Product {
            id: ProductId::new("iphone-14"),
            name: "iPhone 14".to_string(),
            tagline: "Classic and reliable.".to_string(),
            description: "Great battery life and solid everyday performance.".to_string(),
            base_price: Price::new(699),
            storages: tiers(&[128, 256, 512]),
            colors: vec![Color::Black, Color::Blue, Color::White, Color::Red],
            rating: 4.6,
            featured: false,
        },
        Product {
            id: ProductId::new("iphone-se"),
            name: "iPhone SE".to_string(),
            tagline: "Small on the outside, huge on the inside.".to_string(),
            description: "The most affordable iPhone, with a fast chip and the home button \
                          you love."
                .to_string(),
            base_price: Price::new(499),
            storages: tiers(&[64, 128, 256]),
            colors: vec![Color::Black, Color::White, Color::Red],
            rating: 4.4,
            featured: false,
        },
    ]
}
