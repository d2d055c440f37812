//! iStore Core - Shared domain types.
//!
//! This crate provides the value types used across all iStore components:
//! - `storefront` - Cart/catalog state engine
//! - `cli` - Terminal front-end that renders the catalog and cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no logging.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, prices, storage tiers,
//!   palette colors, themes, and checkout contact details

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
