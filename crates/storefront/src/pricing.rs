//! Storage-tier pricing.
//!
//! A configured product costs its base price plus a fixed surcharge for the
//! chosen storage tier. Tiers missing from [`PRICE_MODIFIERS`] carry no
//! surcharge, so pricing never fails.

use istore_core::{Price, StorageTier};

/// Surcharge in dollars per storage tier, in gigabytes.
pub const PRICE_MODIFIERS: [(u32, u64); 5] = [
    (64, 0),
    (128, 0),
    (256, 120),
    (512, 320),
    (1024, 620),
];

/// Surcharge for a storage tier; zero for tiers not in the table.
#[must_use]
pub fn surcharge(storage: StorageTier) -> Price {
    PRICE_MODIFIERS
        .iter()
        .find(|(gigabytes, _)| *gigabytes == storage.gigabytes())
        .map_or(Price::ZERO, |(_, bump)| Price::new(*bump))
}

/// Final price of a product configured with `storage`.
#[must_use]
pub fn price(base_price: Price, storage: StorageTier) -> Price {
    base_price.plus(surcharge(storage))
}

/// Cheapest price across `storages`, or the base price when none are given.
#[must_use]
pub fn min_price(base_price: Price, storages: &[StorageTier]) -> Price {
    storages
        .iter()
        .map(|storage| price(base_price, *storage))
        .min()
        .unwrap_or(base_price)
}
