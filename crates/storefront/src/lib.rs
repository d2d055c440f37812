//! iStore Storefront - cart and catalog state engine.
//!
//! This crate holds all storefront logic as a library, so any front-end
//! (the `istore` terminal binary, tests, a future GUI) drives the same
//! state through [`Storefront`].
//!
//! # Modules
//!
//! - [`pricing`] - Storage-tier surcharges
//! - [`catalog`] - Immutable product definitions
//! - [`listing`] - Search, filter and sort pipeline
//! - [`cart`] - Line items and the persisted cart store
//! - [`checkout`] - Simulated order confirmation
//! - [`theme`] - Persisted light/dark preference
//! - [`storage`] - Key-value persistence backends
//! - [`state`] - The [`Storefront`] facade

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod listing;
pub mod pricing;
pub mod state;
pub mod storage;
pub mod theme;

pub use cart::{Cart, CartStore, LineItem, LineKey, Selection};
pub use catalog::{Catalog, CatalogError, Product};
pub use checkout::{CheckoutError, OrderConfirmation};
pub use config::{ConfigError, StorefrontConfig};
pub use error::{AppError, Result};
pub use listing::{ListedProduct, Listing, ListingQuery, SortOrder};
pub use state::Storefront;
pub use storage::{FileStore, KeyValueStore, MemoryStore, SharedStore, StorageError};
