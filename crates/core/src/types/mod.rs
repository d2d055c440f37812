//! Core types for iStore.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod color;
pub mod contact;
pub mod id;
pub mod price;
pub mod storage;
pub mod theme;

pub use color::{Color, ColorParseError};
pub use contact::{ContactDetails, ContactError, ContactField};
pub use id::*;
pub use price::Price;
pub use storage::{GIGABYTES_PER_TERABYTE, StorageParseError, StorageTier};
pub use theme::{Theme, ThemeParseError};
