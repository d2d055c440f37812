//! Integration tests for the iStore storefront engine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p istore-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart survives reopening and recovers from bad snapshots
//! - `catalog_listing` - Search, filter and sort through the facade
//! - `checkout_flow` - Order confirmation end to end
//! - `theme_persistence` - Theme preference across sessions
//!
//! Every test gets its own data directory, so tests can run in parallel.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::fs;
use std::path::{Path, PathBuf};

use istore_core::StorageTier;
use istore_storefront::{FileStore, Storefront, StorefrontConfig, storage::keys};
use uuid::Uuid;

/// A throwaway data directory for one test, removed on drop.
#[derive(Debug)]
pub struct TestContext {
    dir: PathBuf,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("istore-it-{}", Uuid::new_v4()));
        Self { dir }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Default configuration pointed at this context's directory.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            data_dir: self.dir.clone(),
            ..StorefrontConfig::default()
        }
    }

    /// A fresh storefront session over the persisted state.
    #[must_use]
    pub fn open(&self) -> Storefront {
        Storefront::open(self.config())
    }

    /// Direct access to the backing store.
    #[must_use]
    pub fn store(&self) -> FileStore {
        FileStore::new(self.dir.clone())
    }

    /// Path of the persisted cart snapshot.
    #[must_use]
    pub fn cart_file(&self) -> PathBuf {
        self.dir.join(format!("{}.json", keys::CART))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

/// Storage tier literal for tests.
///
/// # Panics
///
/// Panics if `gigabytes` is zero.
#[must_use]
pub fn tier(gigabytes: u32) -> StorageTier {
    StorageTier::new(gigabytes).expect("storage tier must be positive")
}
